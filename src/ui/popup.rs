use crate::core::geo::LatLng;

/// A link to one contributing track file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLink {
    pub label: String,
    pub url: String,
    /// Open in a new browsing context
    pub new_tab: bool,
}

/// What a popup shows: a header plus a list of links
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupContent {
    pub header: String,
    pub links: Vec<TrackLink>,
}

impl PopupContent {
    /// Markup for renderers that display HTML popups
    pub fn to_html(&self) -> String {
        let links: Vec<String> = self
            .links
            .iter()
            .map(|link| {
                let target = if link.new_tab { " target=\"_blank\"" } else { "" };
                format!(
                    "<a href=\"{}\"{}>{}</a>",
                    escape_html(&link.url),
                    target,
                    escape_html(&link.label)
                )
            })
            .collect();

        format!(
            "<strong>{}</strong><br>\n<div style=\"max-height: 150px; overflow-y: auto;\">\n{}\n</div>",
            escape_html(&self.header),
            links.join("<br>\n")
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Single popup instance; opening it again replaces the previous content
#[derive(Debug, Clone)]
pub struct Popup {
    pub id: String,
    pub position: LatLng,
    pub content: PopupContent,
    pub visible: bool,
    pub close_button: bool,
    pub close_on_click: bool,
}

impl Popup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: LatLng::default(),
            content: PopupContent::default(),
            visible: false,
            close_button: true,
            close_on_click: false,
        }
    }

    /// Moves the popup to `position` and shows `content`
    pub fn open(&mut self, position: LatLng, content: PopupContent) {
        self.position = position;
        self.content = content;
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(header: &str) -> PopupContent {
        PopupContent {
            header: header.to_string(),
            links: vec![TrackLink {
                label: "Activity 7".to_string(),
                url: "https://tracks.example/a?x=1&y=2".to_string(),
                new_tab: true,
            }],
        }
    }

    #[test]
    fn test_reopen_replaces_content() {
        let mut popup = Popup::new("covered-tracks");
        assert!(!popup.is_visible());

        popup.open(LatLng::new(47.1, 9.5), content("first"));
        popup.open(LatLng::new(47.2, 9.6), content("second"));

        assert!(popup.is_visible());
        assert_eq!(popup.content.header, "second");
        assert_eq!(popup.position, LatLng::new(47.2, 9.6));
    }

    #[test]
    fn test_html_escapes_and_targets_new_tab() {
        let html = content("Covered by 1 track:").to_html();
        assert!(html.contains("<strong>Covered by 1 track:</strong>"));
        assert!(html.contains(
            "<a href=\"https://tracks.example/a?x=1&amp;y=2\" target=\"_blank\">Activity 7</a>"
        ));
    }
}
