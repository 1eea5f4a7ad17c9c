use url::Url;

/// Hosts product images may be loaded from.
///
/// Image URLs come from catalog records, so a page only embeds the ones
/// whose host is listed here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImagePolicy {
    domains: Vec<String>,
}

impl ImagePolicy {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.into().trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Whether `src` is an http(s) URL on an allowed host.
    pub fn allows(&self, src: &str) -> bool {
        let Ok(url) = Url::parse(src) else {
            return false;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        url.host_str()
            .map(|host| host.to_ascii_lowercase())
            .is_some_and(|host| self.domains.iter().any(|d| *d == host))
    }
}
