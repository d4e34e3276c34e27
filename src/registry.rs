//! Track, sequence and button definitions.
//!
//! Everything here is `'static` and immutable. The [`BUTTONS`] table is the
//! contract with the hardware: index `i` is physical button `i + 1`.

use crate::debounce::Edge;

/// A track file on storage.
#[derive(Debug, PartialEq, Eq)]
pub struct Track {
    /// Human readable name, used in diagnostics.
    pub title: &'static str,
    /// Path relative to the storage mount point.
    pub path: &'static str,
}

impl Track {
    pub const fn new(title: &'static str, path: &'static str) -> Self {
        Self { title, path }
    }
}

/// Ordered, non-empty list of tracks played back-to-back.
#[derive(Debug, PartialEq, Eq)]
pub struct Sequence {
    pub name: &'static str,
    tracks: &'static [&'static Track],
}

impl Sequence {
    /// Define a sequence. Panics at compile time when `tracks` is empty.
    pub const fn new(name: &'static str, tracks: &'static [&'static Track]) -> Self {
        assert!(!tracks.is_empty(), "sequence must contain at least one track");
        Self { name, tracks }
    }

    /// Track at `index`, `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'static Track> {
        self.tracks.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Which committed edge fires a button's action.
///
/// Playback buttons act on press. The stop button acts on release and the
/// toggle reports both edges. This mirrors the deployed device; whether the
/// release trigger for stop is wanted UX is still open with the product side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    Press,
    Release,
    Both,
}

impl TriggerEdge {
    #[inline]
    pub fn fires_on(self, edge: Edge) -> bool {
        matches!(
            (self, edge),
            (TriggerEdge::Both, _)
                | (TriggerEdge::Press, Edge::Pressed)
                | (TriggerEdge::Release, Edge::Released)
        )
    }
}

/// What a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Play one track, no follow-on.
    DirectTrack(&'static Track),
    /// Play a sequence from its first track.
    SequenceStart(&'static Sequence),
    /// Stop playback.
    StopAll,
    /// Switch state forwarded to the companion device only.
    ToggleSignal,
}

impl Role {
    /// Edge(s) this role acts on.
    pub const fn trigger(&self) -> TriggerEdge {
        match self {
            Role::DirectTrack(_) | Role::SequenceStart(_) => TriggerEdge::Press,
            Role::StopAll => TriggerEdge::Release,
            Role::ToggleSignal => TriggerEdge::Both,
        }
    }

    /// Whether the role starts playback.
    pub const fn is_playback(&self) -> bool {
        matches!(self, Role::DirectTrack(_) | Role::SequenceStart(_))
    }
}

/// Static description of one physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    /// Logical id as printed on the panel (1-based).
    pub id: u8,
    /// GPIO number.
    pub pin: i32,
    pub role: Role,
    /// Line sent to the companion device on a committed press.
    pub press_token: Option<&'static str>,
    /// Line sent to the companion device on a committed release.
    pub release_token: Option<&'static str>,
}

impl ButtonSpec {
    /// Playback button reporting `token` when it fires.
    pub const fn playback(id: u8, pin: i32, role: Role, token: &'static str) -> Self {
        Self { id, pin, role, press_token: Some(token), release_token: None }
    }

    /// Outbound token for `edge`, if this button reports it.
    ///
    /// A token is only reported for edges the role acts on.
    pub fn token_for(&self, edge: Edge) -> Option<&'static str> {
        if !self.role.trigger().fires_on(edge) {
            return None;
        }
        match edge {
            Edge::Pressed => self.press_token,
            Edge::Released => self.release_token,
        }
    }
}

pub static STAR_SPANGLED_BANNER: Track = Track::new("Star Spangled Banner", "/star_spangled_banner.mp3");
pub static CARRY_ON: Track = Track::new("Carry On", "/carry_on.mp3");
pub static TAPS: Track = Track::new("Taps", "/taps.mp3");
pub static FIRST_CALL: Track = Track::new("First Call", "/first_call.mp3");
pub static RETREAT: Track = Track::new("Retreat", "/retreat.mp3");

/// Morning colors: anthem, then carry on.
pub static COLORS: Sequence = Sequence::new("colors", &[&STAR_SPANGLED_BANNER, &CARRY_ON]);

/// Evening colors: retreat, then carry on.
pub static RETREAT_CEREMONY: Sequence = Sequence::new("retreat", &[&RETREAT, &CARRY_ON]);

/// Number of buttons on the panel.
pub const BUTTON_COUNT: usize = 6;

/// Panel layout. The first four entries are reachable from the companion link.
pub static BUTTONS: [ButtonSpec; BUTTON_COUNT] = [
    ButtonSpec::playback(1, 5, Role::SequenceStart(&COLORS), "BTN-Star_Spangled_Banner"),
    ButtonSpec::playback(2, 18, Role::DirectTrack(&TAPS), "BTN-TAPS"),
    ButtonSpec::playback(3, 23, Role::DirectTrack(&FIRST_CALL), "BTN-First_Call"),
    ButtonSpec::playback(4, 13, Role::SequenceStart(&RETREAT_CEREMONY), "BTN-Retreat"),
    ButtonSpec {
        id: 5,
        pin: 33,
        role: Role::StopAll,
        press_token: None,
        release_token: Some("Press_Stop"),
    },
    ButtonSpec {
        id: 6,
        pin: 27,
        role: Role::ToggleSignal,
        press_token: Some("Auto_Sunset_ON"),
        release_token: Some("Auto_Sunset_OFF"),
    },
];
