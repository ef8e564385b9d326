use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Kind of media shown on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MediaKind {
    /// Static image
    Image,
    /// Video clip
    #[default]
    Video,
    /// Animated frame sequence (gif or numbered frames)
    AnimatedSequence,
}

impl MediaKind {
    /// Whether the shared player has anything to do for this kind.
    pub fn is_playable(self) -> bool {
        !matches!(self, MediaKind::Image)
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::AnimatedSequence => write!(f, "animated-sequence"),
        }
    }
}

/// Reference to the media backing a page.
///
/// Paths are opaque to this crate; the host's cover source and media backend
/// resolve them.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaRef {
    pub kind: MediaKind,
    /// Playable (or, for images, displayable) resource.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<PathBuf>,
    /// Cover image shown while not playing. When absent, videos take their
    /// cover from the frame at `poster_time`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cover: Option<PathBuf>,
    /// Per-page loop override. `None` defers to the configured default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub looping: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_time: Duration,
}

impl MediaRef {
    pub fn image(source: impl Into<PathBuf>) -> Self {
        Self {
            kind: MediaKind::Image,
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn video(source: impl Into<PathBuf>) -> Self {
        Self {
            kind: MediaKind::Video,
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn animated(source: impl Into<PathBuf>) -> Self {
        Self {
            kind: MediaKind::AnimatedSequence,
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn with_cover(mut self, cover: impl Into<PathBuf>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = Some(looping);
        self
    }

    pub fn with_poster_time(mut self, at: Duration) -> Self {
        self.poster_time = at;
        self
    }

    /// Resolve the loop flag against the configured default.
    pub fn loops(&self, default: bool) -> bool {
        self.looping.unwrap_or(default)
    }

    /// The path a cover should be read from: the explicit cover if set,
    /// otherwise the source itself (images, or videos at `poster_time`).
    pub fn cover_origin(&self) -> Option<&PathBuf> {
        self.cover.as_ref().or(self.source.as_ref())
    }
}
