//! Blocking REST client for JIRA and the mapping add-on
//!
//! Every request carries basic auth and a bounded per-call timeout. There is
//! no retry or backoff anywhere: a failed call is terminal for the run and
//! surfaces as a `RemoteError` naming the operation.

use crate::core::config::ConnectionSettings;
use crate::core::error::{RatchetError, RatchetResult, RemoteError, RemoteResult};
use crate::jira::traits::{CatalogReads, CatalogWrites};
use crate::jira::types::{Component, Mapping, Project, Version};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, LOCATION};
use serde::de::DeserializeOwned;

/// REST client holding connection settings for the duration of a run
pub struct RestClient {
  http: Client,
  base: String,
  username: String,
  password: String,
}

impl RestClient {
  pub fn new(settings: &ConnectionSettings) -> RatchetResult<Self> {
    let http = Client::builder()
      .timeout(settings.timeout)
      .build()
      .map_err(|e| RatchetError::message(format!("Failed to create HTTP client: {}", e)))?;

    Ok(RestClient {
      http,
      base: settings.base_url.as_str().trim_end_matches('/').to_string(),
      username: settings.username.clone(),
      password: settings.password.clone(),
    })
  }

  fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
    request
      .basic_auth(&self.username, Some(&self.password))
      .header(ACCEPT, "application/json")
  }

  fn send(&self, operation: &str, request: RequestBuilder) -> RemoteResult<Response> {
    let response = self
      .prepare(request)
      .send()
      .map_err(|e| RemoteError::transport(operation, e))?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().unwrap_or_default();
      return Err(RemoteError::rejected(operation, status.as_u16(), body));
    }

    Ok(response)
  }

  fn get_json<T: DeserializeOwned>(&self, operation: &str, url: String) -> RemoteResult<T> {
    let response = self.send(operation, self.http.get(url))?;
    response.json().map_err(|e| RemoteError::decode(operation, e.to_string()))
  }
}

impl CatalogReads for RestClient {
  fn project(&self, key: &str) -> RemoteResult<Project> {
    let operation = format!("fetching project {}", key);
    self.get_json(&operation, format!("{}/rest/api/2/project/{}", self.base, key))
  }

  fn versions(&self, project_id: &str) -> RemoteResult<Vec<Version>> {
    let operation = format!("fetching versions of project {}", project_id);
    self.get_json(&operation, format!("{}/rest/api/2/project/{}/versions", self.base, project_id))
  }

  fn components(&self, project_id: &str) -> RemoteResult<Vec<Component>> {
    let operation = format!("fetching components of project {}", project_id);
    self.get_json(&operation, format!("{}/rest/api/2/project/{}/components", self.base, project_id))
  }

  fn mappings(&self) -> RemoteResult<Vec<Mapping>> {
    let operation = "fetching mappings";
    self.get_json(operation, format!("{}/rest/com.deniz.jira.mapping/latest/mappings", self.base))
  }
}

impl CatalogWrites for RestClient {
  fn create_version(&self, project_id: &str, name: &str) -> RemoteResult<Version> {
    let operation = format!("creating version {}", name);

    let project_id: i64 = project_id
      .parse()
      .map_err(|_| RemoteError::decode(operation.as_str(), format!("project id '{}' is not numeric", project_id)))?;
    let body = serde_json::json!({
      "name": name,
      "description": format!("Version {}", name),
      "projectId": project_id,
      "archived": false,
      "released": false,
    });

    let url = format!("{}/rest/api/2/version", self.base);
    let response = self.send(&operation, self.http.post(url).json(&body))?;
    response.json().map_err(|e| RemoteError::decode(operation.as_str(), e.to_string()))
  }

  fn create_mapping(&self, project_id: u64, component_id: u64, version_id: u64) -> RemoteResult<Mapping> {
    let operation = format!("creating mapping {}/{}/{}", project_id, component_id, version_id);

    let body = serde_json::json!({
      "projectId": project_id,
      "componentId": component_id,
      "versionId": version_id,
      "released": false,
    });

    let url = format!("{}/rest/com.deniz.jira.mapping/latest/", self.base);
    let response = self.send(&operation, self.http.post(url).json(&body))?;

    // The add-on reports the new identifier only through the Location
    // header's trailing path segment.
    let id = mapping_id_from_location(&response)
      .ok_or_else(|| RemoteError::decode(operation.as_str(), "no mapping id in Location header"))?;

    Ok(Mapping::created(id, project_id, component_id, version_id))
  }

  fn update_released_flag(&self, mapping_id: u64, released: bool) -> RemoteResult<()> {
    let operation = format!("updating released flag of mapping {}", mapping_id);

    let url = format!("{}/rest/com.deniz.jira.mapping/latest/releaseFlag/{}", self.base, mapping_id);
    let request = self.http.put(url).query(&[("isReleased", released.to_string())]);
    self.send(&operation, request)?;
    Ok(())
  }

  fn update_release_date(&self, mapping_id: u64, date: &str) -> RemoteResult<()> {
    let operation = format!("updating release date of mapping {}", mapping_id);

    let url = format!("{}/rest/com.deniz.jira.mapping/latest/releaseDate/{}", self.base, mapping_id);
    let request = self.http.put(url).query(&[("releaseDate", date)]);
    self.send(&operation, request)?;
    Ok(())
  }
}

fn mapping_id_from_location(response: &Response) -> Option<u64> {
  let location = response.headers().get(LOCATION)?.to_str().ok()?;
  let segment = location.trim_end_matches('/').rsplit('/').next()?;
  segment.parse().ok()
}
