//! 资源获取抽象
//!
//! 浏览器端用 `fetch`，预览服务器和测试用本地文件。

use crate::error::FetchError;

/// 获取到的响应
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 按路径获取文本资源
///
/// 网络层失败返回 `Err`，服务器有应答时无论状态码都返回 `Ok`。
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        (**self).fetch(path).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use fs::FsFetcher;

#[cfg(not(target_arch = "wasm32"))]
mod fs {
    use super::{FetchResponse, Fetcher};
    use crate::error::FetchError;
    use std::io::ErrorKind;
    use std::path::{Component, Path, PathBuf};

    /// 以站点根目录解析路径的本地文件获取器
    ///
    /// 行为模拟静态文件服务器：文件不存在返回 404，越出根目录返回 403。
    #[derive(Debug, Clone)]
    pub struct FsFetcher {
        root: PathBuf,
    }

    impl FsFetcher {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        fn resolve(&self, path: &str) -> Option<PathBuf> {
            let mut resolved = self.root.clone();
            for component in Path::new(path.trim_start_matches('/')).components() {
                match component {
                    Component::Normal(part) => resolved.push(part),
                    Component::CurDir => {}
                    // 不允许访问根目录之外
                    Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                        return None
                    }
                }
            }
            Some(resolved)
        }
    }

    impl Fetcher for FsFetcher {
        async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
            let Some(file) = self.resolve(path) else {
                return Ok(FetchResponse {
                    status: 403,
                    body: String::new(),
                });
            };

            match tokio::fs::read_to_string(&file).await {
                Ok(body) => Ok(FetchResponse::ok(body)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse {
                    status: 404,
                    body: String::new(),
                }),
                Err(e) => Err(FetchError::Network(format!("{}: {}", file.display(), e))),
            }
        }
    }

}
