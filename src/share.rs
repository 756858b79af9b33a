use url::Url;

use crate::foundation::error::{CardError, CardResult};

/// Share targets offered next to a generated card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharePlatform {
    X,
    Telegram,
    GitHub,
}

impl std::fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Telegram => write!(f, "telegram"),
            Self::GitHub => write!(f, "github"),
        }
    }
}

const X_INTENT_URL: &str = "https://x.com/intent/tweet";
const TELEGRAM_SHARE_URL: &str = "https://t.me/share/url";
/// GitHub has no caption endpoint; sharing opens the project org directly.
pub const GITHUB_SHARE_URL: &str = "https://github.com/sui-foundation";

/// Build the outbound share URL for a platform.
///
/// Captions embed the phrase; the caption and the page address travel as
/// URL-encoded query parameters. Opening the URL is the host's job.
pub fn share_url(platform: SharePlatform, phrase: &str, page_url: &Url) -> CardResult<Url> {
    let url = match platform {
        SharePlatform::X => Url::parse_with_params(
            X_INTENT_URL,
            &[
                ("text", format!("Sui is for {phrase}. Create your own at")),
                ("url", page_url.to_string()),
            ],
        ),
        SharePlatform::Telegram => Url::parse_with_params(
            TELEGRAM_SHARE_URL,
            &[
                ("url", page_url.to_string()),
                ("text", format!("Sui is for {phrase}. Create your own!")),
            ],
        ),
        SharePlatform::GitHub => Url::parse(GITHUB_SHARE_URL),
    };
    url.map_err(|e| CardError::validation(format!("share url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://sui-is-for.example/cards?ref=1").unwrap()
    }

    fn query(url: &Url, key: &str) -> String {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .unwrap()
    }

    #[test]
    fn x_intent_carries_caption_and_page() {
        let url = share_url(SharePlatform::X, "best friends", &page()).unwrap();
        assert_eq!(url.host_str(), Some("x.com"));
        assert_eq!(url.path(), "/intent/tweet");
        assert_eq!(
            query(&url, "text"),
            "Sui is for best friends. Create your own at"
        );
        assert_eq!(query(&url, "url"), page().to_string());
    }

    #[test]
    fn telegram_carries_page_then_caption() {
        let url = share_url(SharePlatform::Telegram, "friends", &page()).unwrap();
        assert_eq!(url.host_str(), Some("t.me"));
        assert_eq!(url.path(), "/share/url");
        assert_eq!(query(&url, "url"), page().to_string());
        assert_eq!(query(&url, "text"), "Sui is for friends. Create your own!");
    }

    #[test]
    fn github_is_a_fixed_link() {
        let url = share_url(SharePlatform::GitHub, "anything", &page()).unwrap();
        assert_eq!(url.as_str(), GITHUB_SHARE_URL);
    }

    #[test]
    fn platforms_display_as_cli_names() {
        assert_eq!(SharePlatform::X.to_string(), "x");
        assert_eq!(SharePlatform::Telegram.to_string(), "telegram");
        assert_eq!(SharePlatform::GitHub.to_string(), "github");
    }
}
