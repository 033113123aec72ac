use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of ADC inputs addressable by an event mask.
pub const MAX_CHANNELS: u8 = 16;

/// Numbering of ADC inputs: mask bit `b` maps to channel `b + origin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrigin {
    /// Bit 0 is `ADC0`
    #[default]
    Zero,
    /// Bit 0 is `ADC1`, matching the instrument's front panel
    One,
}

impl ChannelOrigin {
    /// Offset added to a bit index
    pub fn offset(&self) -> u8 {
        match self {
            ChannelOrigin::Zero => 0,
            ChannelOrigin::One => 1,
        }
    }

    /// Channel index for a mask bit
    #[inline]
    pub fn channel(&self, bit: u8) -> u8 {
        bit + self.offset()
    }

    /// Mask bit for a channel index, if the channel is addressable
    pub fn bit(&self, channel: u8) -> Option<u8> {
        channel
            .checked_sub(self.offset())
            .filter(|bit| *bit < MAX_CHANNELS)
    }
}

impl fmt::Display for ChannelOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset())
    }
}

impl FromStr for ChannelOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "zero" => Ok(ChannelOrigin::Zero),
            "1" | "one" => Ok(ChannelOrigin::One),
            _ => Err(format!("Unknown channel origin '{}'. Valid options: 0, 1", s)),
        }
    }
}

/// Set of ADC inputs, one bit per input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelMask(pub u16);

impl ChannelMask {
    /// Empty mask
    pub const EMPTY: ChannelMask = ChannelMask(0);

    /// Whether the given bit is set
    #[inline]
    pub fn has_bit(&self, bit: u8) -> bool {
        bit < MAX_CHANNELS && (self.0 >> bit) & 1 == 1
    }

    /// Number of set bits
    #[inline]
    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no bit is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Set bits in increasing order
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        let mask = self.0;
        (0..MAX_CHANNELS).filter(move |b| (mask >> b) & 1 == 1)
    }

    /// Channel indices in increasing order
    pub fn channels(&self, origin: ChannelOrigin) -> Vec<u8> {
        self.bits().map(|b| origin.channel(b)).collect()
    }

    /// Rebuild a mask from channel indices; `None` if any is out of range.
    pub fn from_channels(channels: &[u8], origin: ChannelOrigin) -> Option<Self> {
        channels.iter().try_fold(ChannelMask::EMPTY, |mask, &ch| {
            origin.bit(ch).map(|bit| ChannelMask(mask.0 | (1 << bit)))
        })
    }

    /// Union of two masks
    #[inline]
    pub fn union(self, other: ChannelMask) -> ChannelMask {
        ChannelMask(self.0 | other.0)
    }
}

impl std::ops::BitOrAssign for ChannelMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ChannelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
