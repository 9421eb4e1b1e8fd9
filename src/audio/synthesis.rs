//! Built-in track catalog (procedural glicol compositions).

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Selectable built-in track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    /// Arpeggiated saw lead with kick and hats
    #[default]
    CassetteDream,

    /// Slow sub-bass swells
    DeepDrift,

    /// Bright noise hats over a square pulse
    StarShower,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::CassetteDream, Track::DeepDrift, Track::StarShower];

    /// Glicol source for this track
    pub fn composition(self) -> &'static str {
        match self {
            Track::CassetteDream => CASSETTE_DREAM,
            Track::DeepDrift => DEEP_DRIFT,
            Track::StarShower => STAR_SHOWER,
        }
    }

    /// Next track in catalog order, wrapping
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Track::CassetteDream => "Cassette Dream",
            Track::DeepDrift => "Deep Drift",
            Track::StarShower => "Star Shower",
        };
        f.write_str(name)
    }
}

const CASSETTE_DREAM: &str = r#"
~gate: speed 2.0 >> seq 60 _60 _~a 48
~a: choose 48 48 48 72 0 0 0
~amp: ~gate >> envperc 0.001 0.1
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~mod 5.0 >> mul 0.1
~mod: sin 0.2 >> mul 1300 >> add 1500
~kt: speed 4.0 >> seq 60
~kenv: ~kt >> envperc 0.001 0.2
~kick: sin 55 >> mul ~kenv >> mul 0.6
~ht: speed 8.0 >> seq _ 60
~henv: ~ht >> envperc 0.001 0.03
~hat: noise 42 >> hpf 8000 1.0 >> mul ~henv >> mul 0.15
o: mix ~lead ~kick ~hat >> plate 0.1
"#;

const DEEP_DRIFT: &str = r#"
~lfo: sin 0.1 >> mul 0.4 >> add 0.5
~sub: sin 48 >> mul ~lfo >> mul 0.4
~pad: saw 110 >> lpf 400 2.0 >> mul 0.08
~kt: speed 1.0 >> seq 60 _ _ _
~kenv: ~kt >> envperc 0.002 0.6
~boom: sin 40 >> mul ~kenv >> mul 0.5
o: mix ~sub ~pad ~boom >> plate 0.2
"#;

const STAR_SHOWER: &str = r#"
~ht: speed 16.0 >> seq 60 60 _60 60
~henv: ~ht >> envperc 0.001 0.04
~hat: noise 7 >> hpf 6000 1.0 >> mul ~henv >> mul 0.25
~gate: speed 4.0 >> seq 72 _ 84 _
~amp: ~gate >> envperc 0.005 0.08
~pit: ~gate >> mul 261.63
~pulse: squ ~pit >> mul ~amp >> lpf 3000 1.0 >> mul 0.08
o: mix ~hat ~pulse >> plate 0.15
"#;
