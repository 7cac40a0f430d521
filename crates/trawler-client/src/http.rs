//! HTTP implementation of [`TorrentApi`] over the daemon's REST surface.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use trawler_models::{
    AddTorrentRequest, CommandEnvelope, MoveTarget, ProblemDetails, QueueShift, Torrent,
    TorrentCommand, TorrentListQuery,
};

use crate::api::TorrentApi;
use crate::error::{ClientError, ClientResult};

const HEADER_API_KEY: &str = "x-trawler-api-key";

/// reqwest-backed daemon client.
#[derive(Debug, Clone)]
pub struct HttpTorrentApi {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTorrentApi {
    /// Build a client against the given daemon base URL.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] when the base URL does not parse
    /// and [`ClientError::Transport`] when the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: Option<String>) -> ClientResult<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.parse()?,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn apply_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(HEADER_API_KEY, key),
            None => request,
        }
    }

    /// Post one command for a batch of hashes to the action endpoint.
    async fn dispatch(&self, hashes: &[String], command: TorrentCommand) -> ClientResult<()> {
        let envelope = CommandEnvelope {
            hashes: hashes.to_vec(),
            command,
        };
        tracing::debug!(count = envelope.hashes.len(), command = ?envelope.command, "dispatching torrent command");
        let response = self
            .apply_key(self.client.post(self.endpoint("/v1/torrents/action")?))
            .json(&envelope)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TorrentApi for HttpTorrentApi {
    async fn fetch_torrents(&self, query: TorrentListQuery) -> ClientResult<Vec<Torrent>> {
        let mut url = self.endpoint("/v1/torrents")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("sort", query.sort.as_str());
            if query.reverse {
                pairs.append_pair("reverse", "true");
            }
        }
        let response = self.apply_key(self.client.get(url)).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<Vec<Torrent>>().await?)
    }

    async fn set_category(&self, hashes: &[String], category: &str) -> ClientResult<()> {
        self.dispatch(
            hashes,
            TorrentCommand::SetCategory {
                category: category.to_string(),
            },
        )
        .await
    }

    async fn add_tags(&self, hashes: &[String], tags: &[String]) -> ClientResult<()> {
        self.dispatch(
            hashes,
            TorrentCommand::AddTags {
                tags: tags.to_vec(),
            },
        )
        .await
    }

    async fn remove_tags(&self, hashes: &[String], tags: Option<&[String]>) -> ClientResult<()> {
        self.dispatch(
            hashes,
            TorrentCommand::RemoveTags {
                tags: tags.map(<[String]>::to_vec),
            },
        )
        .await
    }

    async fn delete_torrents(&self, hashes: &[String], delete_files: bool) -> ClientResult<()> {
        self.dispatch(hashes, TorrentCommand::Delete { delete_files })
            .await
    }

    async fn set_location(
        &self,
        target: MoveTarget,
        hashes: &[String],
        path: &str,
    ) -> ClientResult<()> {
        self.dispatch(
            hashes,
            TorrentCommand::SetLocation {
                target,
                path: path.to_string(),
            },
        )
        .await
    }

    async fn add_torrents(&self, request: &AddTorrentRequest) -> ClientResult<()> {
        let mut form = Form::new();
        for file in &request.files {
            form = form.part(
                "file",
                Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
            );
        }
        if !request.urls.is_empty() {
            form = form.text("urls", request.urls.join("\n"));
        }
        let options = &request.options;
        if let Some(category) = &options.category {
            form = form.text("category", category.clone());
        }
        if let Some(tags) = &options.tags {
            form = form.text("tags", tags.join(","));
        }
        if let Some(save_path) = &options.save_path {
            form = form.text("save_path", save_path.clone());
        }
        if let Some(rename) = &options.rename {
            form = form.text("rename", rename.clone());
        }
        if let Some(paused) = options.paused {
            form = form.text("paused", paused.to_string());
        }
        if let Some(sequential) = options.sequential {
            form = form.text("sequential", sequential.to_string());
        }
        if let Some(skip_checking) = options.skip_checking {
            form = form.text("skip_checking", skip_checking.to_string());
        }
        if let Some(limit) = options.download_limit {
            form = form.text("download_limit", limit.to_string());
        }
        if let Some(limit) = options.upload_limit {
            form = form.text("upload_limit", limit.to_string());
        }
        if let Some(ratio) = options.ratio_limit {
            form = form.text("ratio_limit", ratio.to_string());
        }

        tracing::debug!(
            files = request.files.len(),
            urls = request.urls.len(),
            "submitting add-torrent request"
        );
        let response = self
            .apply_key(self.client.post(self.endpoint("/v1/torrents")?))
            .multipart(form)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn rename_torrent(&self, hash: &str, name: &str) -> ClientResult<()> {
        let url = self.endpoint(&format!("/v1/torrents/{hash}/name"))?;
        let response = self
            .apply_key(self.client.post(url))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn resume_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.dispatch(hashes, TorrentCommand::Resume).await
    }

    async fn force_resume_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.dispatch(hashes, TorrentCommand::ForceResume).await
    }

    async fn pause_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.dispatch(hashes, TorrentCommand::Pause).await
    }

    async fn recheck_torrents(&self, hashes: &[String]) -> ClientResult<()> {
        self.dispatch(hashes, TorrentCommand::Recheck).await
    }

    async fn shift_queue(&self, hashes: &[String], shift: QueueShift) -> ClientResult<()> {
        self.dispatch(hashes, TorrentCommand::Queue { shift }).await
    }

    async fn export_torrent(&self, hash: &str) -> ClientResult<Vec<u8>> {
        let url = self.endpoint(&format!("/v1/torrents/{hash}/export"))?;
        let response = self.apply_key(self.client.get(url)).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Classify a non-success response into a typed error carrying the
/// daemon's problem detail when one is present.
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let bytes = response.bytes().await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&bytes).trim().to_string();
    let problem = serde_json::from_slice::<ProblemDetails>(&bytes).ok();

    let detail = problem.map_or_else(
        || {
            if body_text.is_empty() {
                "request failed".to_string()
            } else {
                body_text.clone()
            }
        },
        |problem| problem.detail.unwrap_or(problem.title),
    );

    Err(ClientError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use httpmock::prelude::*;
    use serde_json::json;
    use trawler_models::SortKey;

    fn client_for(server: &MockServer) -> HttpTorrentApi {
        HttpTorrentApi::new(&server.base_url(), Some("secret".to_string()))
            .expect("client should build")
    }

    fn sample_torrent() -> serde_json::Value {
        json!({
            "hash": "h1",
            "name": "alpha",
            "state": "downloading",
            "category": "tv",
            "tags": ["hevc"],
            "tracker": "https://tracker.example/announce",
            "priority": 1,
            "added_on": Utc::now().timestamp(),
            "size": 100,
            "progress": 0.5,
            "ratio": 0.1,
            "dlspeed": 10,
            "upspeed": 5,
            "save_path": "/data",
            "download_path": ""
        })
    }

    #[tokio::test]
    async fn fetch_sends_sort_query_and_decodes_records() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/torrents")
                .query_param("sort", "added_on")
                .query_param("reverse", "true")
                .header(HEADER_API_KEY, "secret");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([sample_torrent()]));
        });

        let api = client_for(&server);
        let torrents = api
            .fetch_torrents(TorrentListQuery {
                sort: SortKey::AddedOn,
                reverse: true,
            })
            .await
            .expect("fetch should succeed");

        assert_eq!(torrents.len(), 1);
        assert_eq!(torrents[0].hash, "h1");
        mock.assert();
    }

    #[tokio::test]
    async fn set_category_forwards_exact_arguments() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/torrents/action")
                .header(HEADER_API_KEY, "secret")
                .json_body(json!({
                    "hashes": ["h1"],
                    "command": {"type": "set_category", "category": "movies"}
                }));
            then.status(202);
        });

        let api = client_for(&server);
        api.set_category(&["h1".to_string()], "movies")
            .await
            .expect("set_category should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn delete_carries_the_file_flag() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/torrents/action").json_body(json!({
                "hashes": ["h1", "h2"],
                "command": {"type": "delete", "delete_files": true}
            }));
            then.status(202);
        });

        let api = client_for(&server);
        api.delete_torrents(&["h1".to_string(), "h2".to_string()], true)
            .await
            .expect("delete should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn remove_tags_without_list_clears_all() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/torrents/action").json_body(json!({
                "hashes": ["h1"],
                "command": {"type": "remove_tags"}
            }));
            then.status(202);
        });

        let api = client_for(&server);
        api.remove_tags(&["h1".to_string()], None)
            .await
            .expect("remove_tags should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn set_location_targets_the_requested_path() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/torrents/action").json_body(json!({
                "hashes": ["h1"],
                "command": {"type": "set_location", "target": "save", "path": "/library"}
            }));
            then.status(202);
        });

        let api = client_for(&server);
        api.set_location(MoveTarget::Save, &["h1".to_string()], "/library")
            .await
            .expect("set_location should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn rename_posts_to_the_single_torrent_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/torrents/h1/name")
                .json_body(json!({"name": "renamed"}));
            then.status(200);
        });

        let api = client_for(&server);
        api.rename_torrent("h1", "renamed")
            .await
            .expect("rename should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn queue_shift_serializes_the_direction() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/torrents/action").json_body(json!({
                "hashes": ["h1"],
                "command": {"type": "queue", "shift": "bottom"}
            }));
            then.status(202);
        });

        let api = client_for(&server);
        api.shift_queue(&["h1".to_string()], QueueShift::Bottom)
            .await
            .expect("queue shift should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn add_torrents_submits_a_multipart_form() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/torrents")
                .header(HEADER_API_KEY, "secret");
            then.status(202);
        });

        let api = client_for(&server);
        let request = AddTorrentRequest {
            files: Vec::new(),
            urls: vec!["magnet:?xt=urn:btih:abc".to_string()],
            options: trawler_models::AddTorrentOptions {
                category: Some("movies".to_string()),
                ..Default::default()
            },
        };
        api.add_torrents(&request)
            .await
            .expect("add should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn export_returns_opaque_bytes() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/torrents/h1/export");
            then.status(200)
                .header("content-type", "application/x-bittorrent")
                .body("d8:announce0:e");
        });

        let api = client_for(&server);
        let bytes = api.export_torrent("h1").await.expect("export should succeed");
        assert_eq!(bytes, b"d8:announce0:e".to_vec());
    }

    #[tokio::test]
    async fn problem_detail_surfaces_in_status_errors() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/v1/torrents/action");
            then.status(409)
                .header("content-type", "application/problem+json")
                .json_body(json!({
                    "type": "about:blank",
                    "title": "Conflict",
                    "status": 409,
                    "detail": "torrent is already paused"
                }));
        });

        let api = client_for(&server);
        let err = api
            .pause_torrents(&["h1".to_string()])
            .await
            .expect_err("conflict should fail");
        match err {
            ClientError::Status { status, detail } => {
                assert_eq!(status, 409);
                assert_eq!(detail, "torrent is already paused");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn plain_text_bodies_become_the_detail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/torrents/h1/export");
            then.status(500).body("engine unavailable");
        });

        let api = client_for(&server);
        let err = api
            .export_torrent("h1")
            .await
            .expect_err("server error should fail");
        assert!(matches!(
            err,
            ClientError::Status { status: 500, ref detail } if detail == "engine unavailable"
        ));
    }
}
