use crate::ids::PageId;
use crate::media::MediaRef;

/// One carousel entry and its associated media.
///
/// Everything except the loop flag and the selection flag is fixed at
/// construction; playback state is tracked elsewhere, keyed by [`PageId`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    #[cfg_attr(feature = "serde", serde(default))]
    id: PageId,
    title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    icon: Option<String>,
    media: MediaRef,
    #[cfg_attr(feature = "serde", serde(default))]
    selected: bool,
}

impl Page {
    pub fn new(title: impl Into<String>, media: MediaRef) -> Self {
        Self {
            id: PageId::new(),
            title: title.into(),
            description: None,
            icon: None,
            media,
            selected: false,
        }
    }

    pub fn with_id(mut self, id: PageId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn media(&self) -> &MediaRef {
        &self.media
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.media.looping = Some(looping);
    }
}
