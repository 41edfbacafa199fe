use bevy_ecs::message::Message;

/// One of the two music sources used for crossfading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BgmSlot {
    A,
    B,
}

impl BgmSlot {
    pub fn other(self) -> Self {
        match self {
            BgmSlot::A => BgmSlot::B,
            BgmSlot::B => BgmSlot::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            BgmSlot::A => 0,
            BgmSlot::B => 1,
        }
    }
}

/// Mixer bus a master volume applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixerBus {
    Bgm,
    Se,
}

/// Commands sent *to* the host audio backend.
///
/// Source volumes are linear crossfade weights in `[0, 1]`; the master volume
/// of each bus travels separately, already converted to decibels.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Start `clip` looping on a music source.
    PlayLoop {
        source: BgmSlot,
        clip: String,
        volume: f32,
    },
    SetSourceVolume {
        source: BgmSlot,
        volume: f32,
    },
    Stop {
        source: BgmSlot,
    },
    /// Fire-and-forget sound effect on a pooled voice.
    PlayOneShot {
        voice: usize,
        clip: String,
        volume: f32,
    },
    SetBusVolume {
        bus: MixerBus,
        db: f32,
    },
    Shutdown,
}
