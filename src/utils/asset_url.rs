use crate::config::AssetsConfig;

/// Resolves stored asset paths (profile pictures, project attachments) to
/// URLs under the configured `ASSETS_URL`.
#[derive(Clone, Debug)]
pub struct AssetUrlHelper {
    base_url_with_slash: String,
}

impl AssetUrlHelper {
    pub fn new(assets_config: &AssetsConfig) -> Self {
        let base_url = &assets_config.base_url;
        let base_url_with_slash = if base_url.ends_with('/') {
            base_url.clone()
        } else {
            format!("{}/", base_url)
        };

        Self {
            base_url_with_slash,
        }
    }

    /// Joins a relative path onto the asset base.
    ///
    /// ```ignore
    /// helper.build_url("/profiles/17.png");
    /// // "http://localhost:5001/uploads/profiles/17.png"
    /// ```
    pub fn build_url(&self, path: &str) -> String {
        let clean_path = path.trim_start_matches('/');
        format!("{}{}", self.base_url_with_slash, clean_path)
    }

    /// Absolute http(s) URLs are already resolved, whichever host they
    /// point at.
    pub fn is_absolute_url(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    pub fn process_url(&self, url: &str) -> String {
        if Self::is_absolute_url(url) {
            url.to_string()
        } else {
            self.build_url(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_helper() -> AssetUrlHelper {
        let assets_config = AssetsConfig {
            base_url: "http://localhost:5001/uploads".to_string(),
        };
        AssetUrlHelper::new(&assets_config)
    }

    #[test]
    fn test_build_url() {
        let helper = create_test_helper();

        assert_eq!(
            helper.build_url("profiles/user123.jpg"),
            "http://localhost:5001/uploads/profiles/user123.jpg"
        );
        assert_eq!(
            helper.build_url("/profiles/user123.jpg"),
            "http://localhost:5001/uploads/profiles/user123.jpg"
        );
    }

    #[test]
    fn test_process_url_keeps_absolute_urls() {
        let helper = create_test_helper();

        assert_eq!(
            helper.process_url("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            helper.process_url("http://localhost:5001/uploads/a.png"),
            "http://localhost:5001/uploads/a.png"
        );
        assert_eq!(
            helper.process_url("attachments/plan.pdf"),
            "http://localhost:5001/uploads/attachments/plan.pdf"
        );
    }
}
