//! Display names derived from processed video identifiers such as
//! `2017_Berlin_Kipchoge`.

const LOCATIONS: &[&str] = &[
    "london", "monza", "berlin", "chicago", "new york", "boston", "mosop",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    pub fn letter(self) -> char {
        match self {
            Gender::Female => 'F',
            Gender::Male => 'M',
            Gender::Unknown => '?',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteInfo {
    pub year: String,
    pub name: String,
    pub gender: Gender,
    pub display_name: String,
}

impl AthleteInfo {
    pub fn parse(video_id: &str) -> Self {
        let year = first_year(video_id).unwrap_or_else(|| "Unknown".to_string());

        let lower = video_id.to_lowercase();
        let mut cleaned = lower.clone();
        for loc in LOCATIONS {
            cleaned = cleaned.replace(loc, "");
        }

        let (name, gender) = if cleaned.contains("kiplagat") || lower.contains("mosop") {
            ("Kiplagat".to_string(), Gender::Female)
        } else if cleaned.contains("kipchoge") {
            ("Kipchoge".to_string(), Gender::Male)
        } else {
            let name = video_id
                .replace('_', " ")
                .split_whitespace()
                .find(|part| {
                    !part.chars().all(|c| c.is_ascii_digit())
                        && !LOCATIONS.contains(&part.to_lowercase().as_str())
                })
                .map(title_case)
                .unwrap_or_else(|| "Unknown".to_string());
            (name, Gender::Unknown)
        };

        let display_name = format!("{name} ({year}) ({})", gender.letter());
        Self {
            year,
            name,
            gender,
            display_name,
        }
    }
}

/// A processed video as offered in the selection lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub video_id: String,
    pub athlete: AthleteInfo,
}

impl CatalogEntry {
    pub fn new(video_id: impl Into<String>) -> Self {
        let video_id = video_id.into();
        let athlete = AthleteInfo::parse(&video_id);
        Self { video_id, athlete }
    }

    pub fn display_name(&self) -> &str {
        &self.athlete.display_name
    }
}

fn first_year(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .windows(4)
        .find(|w| w.iter().all(|c| c.is_ascii_digit()))
        .map(|w| w.iter().collect())
}

fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Initial left/right selection: Kiplagat 2009 against Kipchoge 2017 when
/// both are present, otherwise the first two entries.
pub fn default_pair(video_ids: &[String]) -> Option<(String, String)> {
    let first = video_ids.first()?;
    let mut left = None;
    let mut right = None;
    for id in video_ids {
        let info = AthleteInfo::parse(id);
        if info.name == "Kiplagat" && info.year == "2009" {
            left = Some(id.clone());
        }
        if info.name == "Kipchoge" && info.year == "2017" {
            right = Some(id.clone());
        }
    }
    let left = left.unwrap_or_else(|| first.clone());
    let right = right.unwrap_or_else(|| video_ids.get(1).unwrap_or(first).clone());
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_athletes() {
        let info = AthleteInfo::parse("2017_Berlin_Kipchoge");
        assert_eq!(info.name, "Kipchoge");
        assert_eq!(info.gender, Gender::Male);
        assert_eq!(info.display_name, "Kipchoge (2017) (M)");

        let info = AthleteInfo::parse("Kiplagat_London_2009");
        assert_eq!(info.display_name, "Kiplagat (2009) (F)");
    }

    #[test]
    fn mosop_maps_to_kiplagat() {
        let info = AthleteInfo::parse("chicago_mosop_2011");
        assert_eq!(info.name, "Kiplagat");
        assert_eq!(info.gender, Gender::Female);
    }

    #[test]
    fn fallback_takes_first_non_numeric_non_location_token() {
        let info = AthleteInfo::parse("2019_boston_RUPP_marathon");
        assert_eq!(info.name, "Rupp");
        assert_eq!(info.year, "2019");
        assert_eq!(info.display_name, "Rupp (2019) (?)");
    }

    #[test]
    fn missing_parts_are_unknown() {
        let info = AthleteInfo::parse("1234_london");
        assert_eq!(info.name, "Unknown");
        let info = AthleteInfo::parse("trackday");
        assert_eq!(info.year, "Unknown");
        assert_eq!(info.name, "Trackday");
    }

    #[test]
    fn default_pair_prefers_reference_clips() {
        let ids = vec![
            "2015_Rupp".to_string(),
            "2017_Berlin_Kipchoge".to_string(),
            "2009_London_Kiplagat".to_string(),
        ];
        assert_eq!(
            default_pair(&ids),
            Some((
                "2009_London_Kiplagat".to_string(),
                "2017_Berlin_Kipchoge".to_string()
            ))
        );
    }

    #[test]
    fn default_pair_falls_back_to_first_two() {
        let ids = vec!["a_2001".to_string()];
        assert_eq!(
            default_pair(&ids),
            Some(("a_2001".to_string(), "a_2001".to_string()))
        );
        assert_eq!(default_pair(&[]), None);
    }
}
