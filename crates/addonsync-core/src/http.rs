//! Blocking HTTP transfers over libcurl.
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

use std::time::Duration;

use crate::config::HttpConfig;

/// Redirect cap for GETs, matching common client defaults.
const MAX_REDIRECTIONS: u32 = 10;

/// Client options applied to every Easy handle.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl From<&HttpConfig> for HttpOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Status code and body of a completed transfer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn configure(easy: &mut curl::easy::Easy, url: &str, opts: &HttpOptions) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTIONS)?;
    if let Some(d) = opts.connect_timeout {
        easy.connect_timeout(d)?;
    }
    if let Some(d) = opts.timeout {
        easy.timeout(d)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    Ok(())
}

fn perform(mut easy: curl::easy::Easy) -> Result<HttpResponse, curl::Error> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    Ok(HttpResponse { status, body })
}

/// GET `url` and return the status and body. Non-2xx statuses are not errors here.
pub fn get(url: &str, opts: &HttpOptions) -> Result<HttpResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts)?;
    easy.get(true)?;
    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    easy.http_headers(list)?;
    perform(easy)
}

/// POST a JSON body to `url` and return the status and body.
pub fn post_json(url: &str, body: &[u8], opts: &HttpOptions) -> Result<HttpResponse, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts)?;
    easy.post(true)?;
    easy.post_fields_copy(body)?;
    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/json")?;
    list.append("Accept: application/json")?;
    easy.http_headers(list)?;
    perform(easy)
}
