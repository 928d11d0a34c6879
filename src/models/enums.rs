use serde::{Deserialize, Serialize};

use crate::risk::RiskError;

/// Macro to generate a closed enum with as_str, a fixed iteration order,
/// a dense index and std::str::FromStr.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// Position of the variant in [`Self::ALL`].
            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl std::str::FromStr for $name {
            type Err = RiskError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(RiskError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Condition {
    Covid19 => "Covid-19",
    Pneumonia => "Pneumonia",
});

// Declaration order is the update order of the Bayesian chain.
str_enum!(Symptom {
    Cough => "cough",
    Headache => "headache",
    LossOfSmell => "loss_of_smell",
    Fever => "fever",
    HighHeartRate => "high_heart_rate",
    HighBloodPressure => "high_bp",
});

/// Gender as the estimator sees it. Only "male" carries an adjustment,
/// so every other value collapses into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }

    /// Case-insensitive; unrecognised text is `Other`, never an error.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Other
        }
    }

    pub fn is_male(self) -> bool {
        self == Gender::Male
    }
}

impl From<String> for Gender {
    fn from(raw: String) -> Self {
        Gender::parse(&raw)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn condition_names_are_exact() {
        assert_eq!(Condition::Covid19.as_str(), "Covid-19");
        assert_eq!(Condition::Pneumonia.as_str(), "Pneumonia");
        assert_eq!(
            serde_json::to_string(&Condition::Covid19).unwrap(),
            "\"Covid-19\""
        );
    }

    #[test]
    fn symptom_order_is_fixed() {
        let names: Vec<&str> = Symptom::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "cough",
                "headache",
                "loss_of_smell",
                "fever",
                "high_heart_rate",
                "high_bp"
            ]
        );
        for (i, s) in Symptom::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn from_str_roundtrip_and_unknown() {
        assert_eq!(Symptom::from_str("high_bp").unwrap(), Symptom::HighBloodPressure);
        assert_eq!(Condition::from_str("Pneumonia").unwrap(), Condition::Pneumonia);
        assert!(Condition::from_str("covid").is_err());
    }

    #[test]
    fn gender_parse_case_insensitive() {
        assert_eq!(Gender::parse("MALE"), Gender::Male);
        assert_eq!(Gender::parse("male"), Gender::Male);
        assert_eq!(Gender::parse("Male"), Gender::Male);
    }

    #[test]
    fn gender_unrecognised_is_other() {
        assert_eq!(Gender::parse("M"), Gender::Other);
        assert_eq!(Gender::parse("F"), Gender::Other);
        assert_eq!(Gender::parse("female"), Gender::Other);
        assert_eq!(Gender::parse(""), Gender::Other);
        assert_eq!(Gender::parse(" male"), Gender::Other);
        assert_eq!(Gender::parse("nonbinary"), Gender::Other);
    }

    #[test]
    fn gender_deserializes_from_any_text() {
        let g: Gender = serde_json::from_str("\"MaLe\"").unwrap();
        assert!(g.is_male());
        let g: Gender = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(g, Gender::Other);
    }
}
