use reqwest::Url;

/// Returns true if `url` parses and uses the http or https scheme.
pub fn is_http_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(url_) => url_.scheme() == "http" || url_.scheme() == "https",
        Err(_) => false,
    }
}

pub fn get_host(url: &str) -> Option<String> {
    let url_ = Url::parse(url).ok()?;
    url_.host_str().map(|x| x.to_owned())
}
