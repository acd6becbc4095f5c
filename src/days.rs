//! Day-of-week bitmasks.
//!
//! Each day is one bit, with Sunday in the least significant position (1)
//! and Saturday in the greatest (64). Multi-day flags are bitwise unions of
//! the seven base bits. The empty mask is the "any page" query value: every
//! stored mask contains it, so filtering with it selects everything.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// The days on which a page should be opened.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Days: u8 {
        const SUN = 1 << 0;
        const MON = 1 << 1;
        const TUE = 1 << 2;
        const WED = 1 << 3;
        const THU = 1 << 4;
        const FRI = 1 << 5;
        const SAT = 1 << 6;

        const MWF = Self::MON.bits() | Self::WED.bits() | Self::FRI.bits();
        const TTH = Self::TUE.bits() | Self::THU.bits();
        const WEEKENDS = Self::SAT.bits() | Self::SUN.bits();
        const WEEKDAYS = Self::MWF.bits() | Self::TTH.bits();
        const DAILY = Self::WEEKDAYS.bits() | Self::WEEKENDS.bits();
    }
}

/// The day flags offered by the UI surfaces, in display order: the seven
/// single days first, then the multi-day shortcuts.
pub const DAY_MENU: [(Days, &str); 12] = [
    (Days::SUN, "Sunday"),
    (Days::MON, "Monday"),
    (Days::TUE, "Tuesday"),
    (Days::WED, "Wednesday"),
    (Days::THU, "Thursday"),
    (Days::FRI, "Friday"),
    (Days::SAT, "Saturday"),
    (Days::DAILY, "Daily"),
    (Days::MWF, "MWF"),
    (Days::TTH, "TTh"),
    (Days::WEEKDAYS, "Weekdays"),
    (Days::WEEKENDS, "Weekends"),
];

impl Days {
    /// The single-day flag for a weekday index (0 = Sunday .. 6 = Saturday),
    /// matching what the host clock's day-of-week reports.
    pub fn for_weekday(index: u8) -> Option<Days> {
        (index < 7).then(|| Days::from_bits_truncate(1 << index))
    }
}

// Masks persist as their raw integer (0..=127). Anything outside the seven
// legal bits is truncated on the way in, so a `Days` value never holds stray
// high bits no matter what storage hands back.
impl Serialize for Days {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Days {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        Ok(Days::from_bits_truncate((raw & 0x7f) as u8))
    }
}
