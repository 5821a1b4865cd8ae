use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dosha::Vata => write!(f, "Vata"),
            Dosha::Pitta => write!(f, "Pitta"),
            Dosha::Kapha => write!(f, "Kapha"),
        }
    }
}

impl FromStr for Dosha {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vata" => Ok(Dosha::Vata),
            "pitta" => Ok(Dosha::Pitta),
            "kapha" => Ok(Dosha::Kapha),
            _ => Err(format!("Unknown dosha: '{s}'. Use Vata, Pitta or Kapha")),
        }
    }
}

/// Non-empty set of doshas in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaSet(Vec<Dosha>);

impl DoshaSet {
    pub fn new(doshas: impl IntoIterator<Item = Dosha>) -> Result<Self, String> {
        let mut set = Vec::new();
        for dosha in doshas {
            if !set.contains(&dosha) {
                set.push(dosha);
            }
        }
        if set.is_empty() {
            return Err("At least one dosha is required".to_string());
        }
        Ok(DoshaSet(set))
    }

    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, String> {
        let doshas = values
            .iter()
            .map(|v| v.as_ref().parse::<Dosha>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(doshas)
    }

    pub fn contains(&self, dosha: Dosha) -> bool {
        self.0.contains(&dosha)
    }

    pub fn as_slice(&self) -> &[Dosha] {
        &self.0
    }
}

impl fmt::Display for DoshaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl FromStr for DoshaSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').filter(|p| !p.trim().is_empty()).collect();
        Self::parse(&parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PITTA".parse::<Dosha>().unwrap(), Dosha::Pitta);
        assert_eq!(" kapha ".parse::<Dosha>().unwrap(), Dosha::Kapha);
        assert!("tridosha".parse::<Dosha>().is_err());
    }

    #[test]
    fn test_set_dedups_and_keeps_order() {
        let set = DoshaSet::parse(&["pitta", "Kapha", "PITTA"]).unwrap();
        assert_eq!(set.as_slice(), &[Dosha::Pitta, Dosha::Kapha]);
        assert_eq!(set.to_string(), "Pitta, Kapha");
    }

    #[test]
    fn test_empty_set_rejected() {
        let empty: [&str; 0] = [];
        assert!(DoshaSet::parse(&empty).is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let set: DoshaSet = "Vata, Kapha".parse().unwrap();
        assert!(set.contains(Dosha::Vata));
        assert!(!set.contains(Dosha::Pitta));
        assert_eq!(set.to_string().parse::<DoshaSet>().unwrap(), set);
    }
}
