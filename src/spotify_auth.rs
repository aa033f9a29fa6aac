//! Interactive authorization-code flow.
//!
//! Opens the Spotify consent page in the user's browser and catches the
//! redirect on a short-lived localhost listener, then exchanges the code for
//! a token. Tokens are not cached; every run re-authorizes.

use rspotify::prelude::OAuthClient;
use rspotify::{scopes, AuthCodeSpotify, Credentials, OAuth};
use tiny_http::{Response, Server};
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// Runs the full login flow and returns a session ready for Web API calls.
/// Blocks until the user finishes (or denies) the consent page; the only
/// scope requested is `playlist-modify-public`.
pub async fn get_spotify_client(config: &Config) -> Result<AuthCodeSpotify> {
    let creds = Credentials::new(&config.client_id, &config.client_secret);
    let oauth = OAuth {
        scopes: scopes!("playlist-modify-public"),
        redirect_uri: config.redirect_uri.clone(),
        ..Default::default()
    };
    let spotify = AuthCodeSpotify::new(creds, oauth);

    let auth_url = spotify
        .get_authorize_url(false)
        .map_err(|err| Error::Auth(err.to_string()))?;
    let code = listen_for_code(&config.redirect_uri, &auth_url)?;

    spotify
        .request_token(&code)
        .await
        .map_err(|err| Error::Auth(err.to_string()))?;

    Ok(spotify)
}

/// Serves the redirect target until Spotify sends the user back with a code.
/// The listener must be up before the browser opens, or a fast redirect can
/// land on a closed port.
fn listen_for_code(redirect_uri: &str, auth_url: &str) -> Result<String> {
    let address = callback_address(redirect_uri)?;
    let server = Server::http(address.as_str())
        .map_err(|err| Error::Auth(format!("could not listen on {address}: {err}")))?;

    if webbrowser::open(auth_url).is_err() {
        log::warn!("[Auth] Could not open a browser; visit this URL manually: {auth_url}");
    }
    log::info!("[Auth] Waiting for the Spotify redirect on {address}");

    loop {
        let request = server
            .recv()
            .map_err(|err| Error::Auth(format!("callback listener failed: {err}")))?;

        if let Some(code) = authorization_code(request.url()) {
            let _ = request.respond(Response::from_string(
                "Authorization complete. You can close this tab and return to the app.",
            ));
            return Ok(code);
        }

        if let Some(reason) = authorization_error(request.url()) {
            let _ = request.respond(Response::from_string(
                "Authorization failed. You can close this tab.",
            ));
            return Err(Error::Auth(format!("Spotify reported '{reason}'")));
        }

        // Browsers also ask for favicons and the like; wave those through.
        let _ = request.respond(Response::from_string("Not found").with_status_code(404));
    }
}

/// host:port to bind the callback listener on, taken from the redirect URI.
fn callback_address(redirect_uri: &str) -> Result<String> {
    let url = Url::parse(redirect_uri)
        .map_err(|err| Error::Auth(format!("invalid redirect URI '{redirect_uri}': {err}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::Auth(format!("redirect URI '{redirect_uri}' has no host")))?;
    let port = url.port().unwrap_or(80);
    Ok(format!("{host}:{port}"))
}

fn query_param(request_url: &str, name: &str) -> Option<String> {
    let (_, query) = request_url.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn authorization_code(request_url: &str) -> Option<String> {
    query_param(request_url, "code")
}

fn authorization_error(request_url: &str) -> Option<String> {
    query_param(request_url, "error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_address_uses_the_redirect_host_and_port() {
        assert_eq!(
            callback_address("http://localhost:8888/callback").unwrap(),
            "localhost:8888"
        );
        assert_eq!(
            callback_address("http://127.0.0.1:3000/callback").unwrap(),
            "127.0.0.1:3000"
        );
    }

    #[test]
    fn callback_address_defaults_to_port_80() {
        assert_eq!(callback_address("http://localhost/callback").unwrap(), "localhost:80");
    }

    #[test]
    fn callback_address_rejects_garbage() {
        assert!(matches!(callback_address("not a uri"), Err(Error::Auth(_))));
    }

    #[test]
    fn extracts_the_code_from_the_redirect() {
        assert_eq!(
            authorization_code("/callback?code=AQBzrT4c&state=xyz").as_deref(),
            Some("AQBzrT4c")
        );
    }

    #[test]
    fn decodes_url_encoded_codes() {
        assert_eq!(
            authorization_code("/callback?code=a%2Fb%3D&state=xyz").as_deref(),
            Some("a/b=")
        );
    }

    #[test]
    fn strays_without_a_query_carry_nothing() {
        assert_eq!(authorization_code("/favicon.ico"), None);
        assert_eq!(authorization_error("/favicon.ico"), None);
    }

    #[test]
    fn denied_consent_reports_the_error_param() {
        let request_url = "/callback?error=access_denied&state=xyz";
        assert_eq!(authorization_code(request_url), None);
        assert_eq!(
            authorization_error(request_url).as_deref(),
            Some("access_denied")
        );
    }
}
