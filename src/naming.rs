//! Converts comma separated identifier lists between naming conventions
//!
//! Decoration around each identifier (brackets, backticks, quotes, whitespace)
//! is kept as is, so `[person_id], [date_of_birth]` becomes
//! `[PersonId], [DateOfBirth]`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use convert_case::Boundary;
use convert_case::Case;
use convert_case::Converter;

use crate::error::Error;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingConvention {
    /// `PersonId`
    Pascal,
    /// `personId`
    Camel,
    /// `person_id`
    LowerSnake,
    /// `PERSON_ID`
    UpperSnake,
}

pub type Conversion = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone)]
pub struct NameConverter {
    conversions: HashMap<(NamingConvention, NamingConvention), Conversion>,
}

impl NamingConvention {
    const ALL: [NamingConvention; 4] = [Self::Pascal, Self::Camel, Self::LowerSnake, Self::UpperSnake];

    fn case(self) -> Case<'static> {
        match self {
            Self::Pascal => Case::Pascal,
            Self::Camel => Case::Camel,
            Self::LowerSnake => Case::Snake,
            Self::UpperSnake => Case::UpperSnake,
        }
    }
}

/// Words split on `aA`, `1A` and `_`, so `ABSTract` stays one word
const WORD_BOUNDARIES: [Boundary; 3] = [Boundary::LowerUpper, Boundary::DigitUpper, Boundary::Underscore];

fn case_conversion(case: Case<'static>) -> Conversion {
    let converter = Converter::new().set_boundaries(&WORD_BOUNDARIES).to_case(case);
    Arc::new(move |s: &str| converter.convert(s))
}

impl Default for NameConverter {
    fn default() -> Self {
        let mut conversions: HashMap<(NamingConvention, NamingConvention), Conversion> = HashMap::new();
        for from in NamingConvention::ALL {
            for to in NamingConvention::ALL.into_iter().filter(|to| *to != from) {
                conversions.insert((from, to), case_conversion(to.case()));
            }
        }

        Self { conversions }
    }
}

impl NameConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `conversion`, replacing any existing one for the same pair
    pub fn add_conversion(
        &mut self,
        from: NamingConvention,
        to: NamingConvention,
        conversion: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Result<&mut Self> {
        if from == to {
            return Err(Error::SameConvention(from));
        }
        self.conversions.insert((from, to), Arc::new(conversion));
        Ok(self)
    }

    pub fn convert(&self, from: NamingConvention, to: NamingConvention, source: &str) -> Result<String> {
        if from == to {
            return Ok(source.to_string());
        }
        let conversion = self.conversions.get(&(from, to)).ok_or(Error::MissingConversion { from, to })?;

        let converted: Vec<String> = source.split(',').map(|element| convert_element(element, conversion)).collect();
        Ok(converted.join(","))
    }
}

impl fmt::Debug for NameConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameConverter").field("conversions", &self.conversions.len()).finish()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn convert_element(element: &str, conversion: &Conversion) -> String {
    let Some(start) = element.find(is_word_char) else {
        return element.to_string();
    };
    let end = element.rfind(is_word_char).map_or(element.len(), |i| i + 1);
    format!("{}{}{}", &element[..start], conversion(&element[start..end]), &element[end..])
}

#[cfg(test)]
mod tests {
    use super::NamingConvention::*;
    use super::*;

    #[test]
    fn test_pascal_to_lower_snake() {
        let converter = NameConverter::default();
        assert_eq!(converter.convert(Pascal, LowerSnake, "PersonId,Name").unwrap(), "person_id,name");
        assert_eq!(
            converter.convert(Pascal, LowerSnake, "FirstName,DateOfBirth,Not_ImplementedToday").unwrap(),
            "first_name,date_of_birth,not_implemented_today"
        );
        assert_eq!(
            converter.convert(Pascal, LowerSnake, "ABSTract,OrderedDictionary,TOTally").unwrap(),
            "abstract,ordered_dictionary,totally"
        );
    }

    #[test]
    fn test_snake_to_pascal_keeps_decoration() {
        let converter = NameConverter::default();
        assert_eq!(
            converter
                .convert(LowerSnake, Pascal, "[person_id],[household_segment_fk],[date_0f_birth]")
                .unwrap(),
            "[PersonId],[HouseholdSegmentFk],[Date0fBirth]"
        );
        assert_eq!(converter.convert(LowerSnake, Pascal, " `first_name` , \"last_name\"").unwrap(), " `FirstName` , \"LastName\"");
    }

    #[test]
    fn test_other_pairs() {
        let converter = NameConverter::default();
        assert_eq!(converter.convert(Pascal, Camel, "PersonId").unwrap(), "personId");
        assert_eq!(converter.convert(Camel, Pascal, "personId").unwrap(), "PersonId");
        assert_eq!(converter.convert(Camel, UpperSnake, "personId,dateOfBirth").unwrap(), "PERSON_ID,DATE_OF_BIRTH");
        assert_eq!(converter.convert(UpperSnake, Camel, "PERSON_ID").unwrap(), "personId");
        assert_eq!(converter.convert(UpperSnake, LowerSnake, "PERSON_ID").unwrap(), "person_id");
        assert_eq!(converter.convert(LowerSnake, UpperSnake, "person_id").unwrap(), "PERSON_ID");
    }

    #[test]
    fn test_default_registers_every_pair() {
        let converter = NameConverter::default();
        assert_eq!(converter.conversions.len(), 12);
        assert_eq!(converter.convert(Pascal, UpperSnake, "Line2Total,HTMLBody").unwrap(), "LINE2_TOTAL,HTMLBODY");
        assert_eq!(converter.convert(LowerSnake, Camel, "line_2_total").unwrap(), "line2Total");
    }

    #[test]
    fn test_identity_returns_input() {
        let converter = NameConverter::default();
        assert_eq!(converter.convert(Pascal, Pascal, " [Odd] ,Name").unwrap(), " [Odd] ,Name");
    }

    #[test]
    fn test_add_conversion() {
        let mut converter = NameConverter::default();
        assert!(matches!(converter.add_conversion(Camel, Camel, |s| s.to_string()), Err(Error::SameConvention(Camel))));

        converter.add_conversion(Pascal, Camel, |s| s.to_lowercase()).unwrap();
        assert_eq!(converter.convert(Pascal, Camel, "PersonId").unwrap(), "personid");
    }

    #[test]
    fn test_missing_conversion() {
        let converter = NameConverter { conversions: HashMap::new() };
        let err = converter.convert(Pascal, Camel, "PersonId").unwrap_err();
        assert!(matches!(err, Error::MissingConversion { from: Pascal, to: Camel }));
    }
}
