//! The hosting page, as seen by the gateway.

/// Side effects the gateway needs from whatever is displaying the app.
///
/// In the browser this is `window.location`, the DOM and a Dioxus signal; in
/// tests it is a recorder.
pub trait Page {
    /// Leave the app for `url` (full navigation, not a client-side route).
    fn navigate(&self, url: &str);

    /// The anti-forgery token for state-changing requests, if the page has one.
    fn csrf_token(&self) -> Option<String>;

    /// Shared error surface for content-fetch failures. `message` is already
    /// stripped of markup.
    fn show_error(&self, message: &str);
}

impl<P: Page + ?Sized> Page for &P {
    fn navigate(&self, url: &str) {
        (**self).navigate(url)
    }

    fn csrf_token(&self) -> Option<String> {
        (**self).csrf_token()
    }

    fn show_error(&self, message: &str) {
        (**self).show_error(message)
    }
}
