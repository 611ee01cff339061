//! Live adapter for the `FileStore` port over the backend's `/files` API.

use serde::{Deserialize, Serialize};

use super::http::BackendHttp;
use crate::ports::{BackendFuture, FileNode, FileStore};

/// File store backed by the HTTP backend.
pub struct LiveFileStore {
    http: BackendHttp,
}

impl LiveFileStore {
    /// Creates a file store using the given backend client.
    #[must_use]
    pub fn new(http: BackendHttp) -> Self {
        Self { http }
    }
}

#[derive(Deserialize)]
struct TreeResponse {
    files: Vec<FileNode>,
}

#[derive(Deserialize)]
struct ContentResponse {
    content: String,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    path: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    content: &'a str,
}

impl FileStore for LiveFileStore {
    fn list_tree(&self) -> BackendFuture<'_, Vec<FileNode>> {
        Box::pin(async move {
            let request = self.http.client().get(self.http.url("/files"));
            let response: TreeResponse = self.http.send_json(request).await?;
            Ok(response.files)
        })
    }

    fn read(&self, path: &str) -> BackendFuture<'_, String> {
        let url = self.http.file_url(path);
        Box::pin(async move {
            let response: ContentResponse =
                self.http.send_json(self.http.client().get(url)).await?;
            Ok(response.content)
        })
    }

    fn create(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        let request = self
            .http
            .client()
            .post(self.http.url("/files"))
            .json(&CreateBody { path, content });
        Box::pin(async move { self.http.send_unit(request).await })
    }

    fn update(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        let request = self.http.client().put(self.http.file_url(path)).json(&UpdateBody { content });
        Box::pin(async move { self.http.send_unit(request).await })
    }

    fn delete(&self, path: &str) -> BackendFuture<'_, ()> {
        let request = self.http.client().delete(self.http.file_url(path));
        Box::pin(async move { self.http.send_unit(request).await })
    }
}
