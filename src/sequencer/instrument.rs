/// The nine drum voices, one grid row each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    BassDrum,
    Snare,
    ClosedHiHat,
    OpenHiHat,
    Crash,
    Ride,
    HighTom,
    MidTom,
    FloorTom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const GRAY: Rgb = Rgb(200, 200, 200);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const GREEN: Rgb = Rgb(0, 255, 0);

impl Instrument {
    /// Top to bottom row order.
    pub const ALL: [Instrument; 9] = [
        Instrument::BassDrum,
        Instrument::Snare,
        Instrument::ClosedHiHat,
        Instrument::OpenHiHat,
        Instrument::Crash,
        Instrument::Ride,
        Instrument::HighTom,
        Instrument::MidTom,
        Instrument::FloorTom,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Instrument::BassDrum => "BD",
            Instrument::Snare => "SD",
            Instrument::ClosedHiHat => "CH",
            Instrument::OpenHiHat => "OH",
            Instrument::Crash => "CC",
            Instrument::Ride => "RC",
            Instrument::HighTom => "T1",
            Instrument::MidTom => "T2",
            Instrument::FloorTom => "T3",
        }
    }

    pub fn sample_file(self) -> &'static str {
        match self {
            Instrument::BassDrum => "bass-drum1.wav",
            Instrument::Snare => "snare-drum2.wav",
            Instrument::ClosedHiHat => "closed-hi-hat2.wav",
            Instrument::OpenHiHat => "open-hi-hat1.wav",
            Instrument::Crash => "crash-cymbal3.wav",
            Instrument::Ride => "ride-cymbal1.wav",
            Instrument::HighTom => "hi-tom3.wav",
            Instrument::MidTom => "hi-tom2.wav",
            Instrument::FloorTom => "floor-tom1.wav",
        }
    }

    /// Color of an active tile and of the row label.
    pub fn color(self) -> Rgb {
        match self {
            Instrument::BassDrum => Rgb(0, 0, 255),
            Instrument::Snare => Rgb(255, 255, 0),
            Instrument::ClosedHiHat => GREEN,
            Instrument::OpenHiHat => Rgb(50, 200, 50),
            Instrument::Crash => RED,
            Instrument::Ride => Rgb(200, 50, 50),
            Instrument::HighTom => Rgb(152, 118, 84),
            Instrument::MidTom => Rgb(150, 75, 0),
            Instrument::FloorTom => Rgb(90, 61, 48),
        }
    }

    /// General MIDI percussion key (channel 10)
    pub fn gm_note(self) -> u8 {
        match self {
            Instrument::BassDrum => 36,
            Instrument::Snare => 38,
            Instrument::ClosedHiHat => 42,
            Instrument::OpenHiHat => 46,
            Instrument::Crash => 49,
            Instrument::Ride => 51,
            Instrument::HighTom => 50,
            Instrument::MidTom => 48,
            Instrument::FloorTom => 41,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_order_matches_index() {
        for (i, instrument) in Instrument::ALL.iter().enumerate() {
            assert_eq!(instrument.index(), i);
        }
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Instrument::ALL.iter().map(|i| i.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Instrument::ALL.len());
    }
}
