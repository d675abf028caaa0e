use crate::foundation::CSRF_COOKIE_NAME;

/// Where the backend anti-forgery token comes from.
pub trait CsrfTokenSource: Send + Sync {
    fn cookie(&self, name: &str) -> Option<String>;
    fn form_token(&self) -> Option<String>;

    /// `csrftoken` cookie first, then the form field. Empty values count as absent.
    fn resolve(&self) -> Option<String> {
        self.cookie(CSRF_COOKIE_NAME).filter(|token| !token.is_empty()).or_else(|| self.form_token().filter(|token| !token.is_empty()))
    }
}

/// Token source backed by a raw `Cookie` header and an optional form token.
#[derive(Clone, Debug, Default)]
pub struct StaticCsrfSource {
    cookie_header: String,
    form_token: Option<String>,
}

impl StaticCsrfSource {
    pub fn new(cookie_header: impl Into<String>, form_token: Option<String>) -> Self {
        Self { cookie_header: cookie_header.into(), form_token }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl CsrfTokenSource for StaticCsrfSource {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookie_header.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
    }

    fn form_token(&self) -> Option<String> {
        self.form_token.clone()
    }
}
