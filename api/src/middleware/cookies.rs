//! Token transport over HttpOnly cookies

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};

use fa_core::services::TokenLifetimes;
use fa_shared::CookieConfig;

use crate::handlers::{ApiError, ApiResult};

/// Reads and writes the access and refresh cookies
#[derive(Debug, Clone)]
pub struct TokenCookies {
    config: CookieConfig,
    lifetimes: TokenLifetimes,
}

impl TokenCookies {
    pub fn new(config: CookieConfig, lifetimes: TokenLifetimes) -> Self {
        Self { config, lifetimes }
    }

    pub fn config(&self) -> &CookieConfig {
        &self.config
    }

    /// Access token sent with the request
    pub fn access(&self, req: &HttpRequest) -> ApiResult<String> {
        read(req, &self.config.access_name, "access")
    }

    /// Refresh token sent with the request
    pub fn refresh(&self, req: &HttpRequest) -> ApiResult<String> {
        read(req, &self.config.refresh_name, "refresh")
    }

    pub fn set_access(&self, response: &mut HttpResponseBuilder, token: &str) {
        response.cookie(self.build(&self.config.access_name, token, self.lifetimes.access));
    }

    pub fn set_refresh(&self, response: &mut HttpResponseBuilder, token: &str) {
        response.cookie(self.build(&self.config.refresh_name, token, self.lifetimes.refresh));
    }

    /// Expire both cookies
    pub fn clear(&self, response: &mut HttpResponseBuilder) {
        for name in [&self.config.access_name, &self.config.refresh_name] {
            let mut cookie = self.build(name, "", 0);
            cookie.make_removal();
            response.cookie(cookie);
        }
    }

    fn build(&self, name: &str, value: &str, max_age: i64) -> Cookie<'static> {
        let mut builder = Cookie::build(name.to_string(), value.to_string())
            .path(self.config.path.clone())
            .http_only(true)
            .secure(self.config.secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(max_age));

        if let Some(domain) = &self.config.domain {
            builder = builder.domain(domain.clone());
        }

        builder.finish()
    }
}

fn read(req: &HttpRequest, name: &str, kind: &'static str) -> ApiResult<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingCookie(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test::TestRequest, HttpResponse};

    fn cookies() -> TokenCookies {
        TokenCookies::new(
            CookieConfig {
                domain: Some("example.com".to_string()),
                ..CookieConfig::default()
            },
            TokenLifetimes {
                access: 900,
                refresh: 86400,
            },
        )
    }

    #[test]
    fn test_cookie_attributes() {
        let mut response = HttpResponse::Ok();
        cookies().set_access(&mut response, "token-a");
        let response = response.finish();

        let cookie = response.cookies().next().unwrap();
        assert_eq!(cookie.name(), "access_c");
        assert_eq!(cookie.value(), "token-a");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(900)));
    }

    #[test]
    fn test_clear_expires_both() {
        let mut response = HttpResponse::Ok();
        cookies().clear(&mut response);
        let response = response.finish();

        let cleared: Vec<_> = response.cookies().collect();
        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().all(|c| c.value().is_empty()));
        assert!(cleared.iter().all(|c| c.max_age() == Some(Duration::ZERO)));
    }

    #[test]
    fn test_read_missing_and_present() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            cookies().refresh(&req),
            Err(ApiError::MissingCookie("refresh"))
        ));

        let req = TestRequest::default()
            .cookie(Cookie::new("refresh_c", "token-r"))
            .to_http_request();
        assert_eq!(cookies().refresh(&req).unwrap(), "token-r");
    }
}
