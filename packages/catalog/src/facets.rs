//! Facet checkbox groups (cost, grade, subject) and their tag predicates

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A filter category with a fixed set of selectable values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Cost,
    Grade,
    Subject,
}

impl Facet {
    /// Display label used on filter pills
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cost => "Cost",
            Self::Grade => "Grade",
            Self::Subject => "Subject",
        }
    }

    /// Checkbox `name` attribute / query parameter
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Grade => "grade",
            Self::Subject => "subject",
        }
    }

    pub fn all() -> &'static [Facet] {
        &[Self::Cost, Self::Grade, Self::Subject]
    }

    /// Values of this facet in checkbox order
    pub fn values(&self) -> impl Iterator<Item = FacetValue> + '_ {
        FacetValue::all().iter().copied().filter(move |v| v.facet() == *self)
    }
}

/// One selectable checkbox. Declaration order is document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FacetValue {
    // Cost
    Free,
    Freemium,
    Paid,
    // Grade
    PreK,
    Elementary,
    Middle,
    High,
    College,
    K12,
    // Subject
    Math,
    Science,
    Ela,
    Social,
    Arts,
    Pe,
    Languages,
    Cs,
}

impl FacetValue {
    pub fn all() -> &'static [FacetValue] {
        &[
            Self::Free,
            Self::Freemium,
            Self::Paid,
            Self::PreK,
            Self::Elementary,
            Self::Middle,
            Self::High,
            Self::College,
            Self::K12,
            Self::Math,
            Self::Science,
            Self::Ela,
            Self::Social,
            Self::Arts,
            Self::Pe,
            Self::Languages,
            Self::Cs,
        ]
    }

    pub fn facet(&self) -> Facet {
        match self {
            Self::Free | Self::Freemium | Self::Paid => Facet::Cost,
            Self::PreK | Self::Elementary | Self::Middle | Self::High | Self::College | Self::K12 => {
                Facet::Grade
            }
            _ => Facet::Subject,
        }
    }

    /// Checkbox `value` attribute
    pub fn value(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Freemium => "freemium",
            Self::Paid => "paid",
            Self::PreK => "pre-k",
            Self::Elementary => "elementary",
            Self::Middle => "middle",
            Self::High => "high",
            Self::College => "college",
            Self::K12 => "k-12",
            Self::Math => "math",
            Self::Science => "science",
            Self::Ela => "ela",
            Self::Social => "social",
            Self::Arts => "arts",
            Self::Pe => "pe",
            Self::Languages => "languages",
            Self::Cs => "cs",
        }
    }

    /// Human label shown on pills
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Freemium => "Freemium",
            Self::Paid => "Premium/Paid",
            Self::PreK => "Pre-K",
            Self::Elementary => "Elementary",
            Self::Middle => "Middle School",
            Self::High => "High School",
            Self::College => "College",
            Self::K12 => "K-12",
            Self::Math => "Mathematics",
            Self::Science => "Science",
            Self::Ela => "ELA/Literacy",
            Self::Social => "Social Studies",
            Self::Arts => "Arts & Music",
            Self::Pe => "PE/Health",
            Self::Languages => "Languages",
            Self::Cs => "CS/Tech",
        }
    }

    /// Substring predicate against a lowercased tag string
    pub fn matches(&self, tags: &str) -> bool {
        let any = |needles: &[&str]| needles.iter().any(|n| tags.contains(n));
        match self {
            Self::Free => tags.contains("free") && !tags.contains("freemium"),
            Self::Freemium => tags.contains("freemium"),
            Self::Paid => any(&["paid", "premium"]),
            Self::PreK => any(&["pre-k", "prek"]),
            Self::Elementary => any(&["elementary", "k-5"]),
            Self::Middle => any(&["middle", "6-8"]),
            Self::High => any(&["high school", "9-12"]),
            Self::College => any(&["college", "higher ed"]),
            Self::K12 => tags.contains("k-12"),
            Self::Math => tags.contains("math"),
            Self::Science => tags.contains("science"),
            Self::Ela => any(&["reading", "writing", "literacy", "ela"]),
            Self::Social => any(&["social studies", "history", "geography"]),
            Self::Arts => any(&["art", "music"]),
            Self::Pe => any(&["pe", "health", "physical"]),
            Self::Languages => any(&["language", "spanish", "french"]),
            Self::Cs => any(&["coding", "computer", "tech"]),
        }
    }

    /// Look up a checkbox by facet and value attribute
    pub fn parse(facet: Facet, value: &str) -> Option<FacetValue> {
        facet.values().find(|v| v.value() == value)
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for FacetValue {
    type Err = String;

    /// Accepts a bare value (`math`) or a qualified one (`subject:math`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let found = match s.split_once(':') {
            Some((facet, value)) => Facet::all()
                .iter()
                .find(|f| f.key() == facet)
                .and_then(|f| FacetValue::parse(*f, value)),
            None => FacetValue::all().iter().copied().find(|v| v.value() == s),
        };
        found.ok_or_else(|| format!("unknown filter value '{}'", s))
    }
}

/// A removable chip describing one active facet value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPill {
    pub facet: Facet,
    pub facet_label: &'static str,
    pub value: &'static str,
    pub label: &'static str,
}

/// Checked state of every facet checkbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSelection {
    checked: BTreeSet<FacetValue>,
}

impl Default for FacetSelection {
    /// Every box checked, which filters nothing
    fn default() -> Self {
        Self::all()
    }
}

impl FacetSelection {
    pub fn all() -> Self {
        Self {
            checked: FacetValue::all().iter().copied().collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            checked: BTreeSet::new(),
        }
    }

    /// Select exactly the given values
    pub fn only(values: impl IntoIterator<Item = FacetValue>) -> Self {
        Self {
            checked: values.into_iter().collect(),
        }
    }

    pub fn set(&mut self, value: FacetValue, checked: bool) {
        if checked {
            self.checked.insert(value);
        } else {
            self.checked.remove(&value);
        }
    }

    pub fn toggle(&mut self, value: FacetValue) {
        let checked = self.is_checked(value);
        self.set(value, !checked);
    }

    pub fn is_checked(&self, value: FacetValue) -> bool {
        self.checked.contains(&value)
    }

    /// Every checkbox of every group is checked
    pub fn is_all_selected(&self) -> bool {
        self.checked.len() == FacetValue::all().len()
    }

    /// Checked values of one facet, in checkbox order
    pub fn selected(&self, facet: Facet) -> impl Iterator<Item = FacetValue> + '_ {
        self.checked.iter().copied().filter(move |v| v.facet() == facet)
    }

    /// Whether a lowercased tag string passes every facet group.
    ///
    /// All-selected passes everything. Otherwise each group passes when it has no
    /// selection or any selected value's predicate matches.
    pub fn matches(&self, tags: &str) -> bool {
        if self.is_all_selected() {
            return true;
        }
        Facet::all().iter().all(|facet| {
            let mut selected = self.selected(*facet).peekable();
            selected.peek().is_none() || selected.any(|v| v.matches(tags))
        })
    }

    /// Pills for the active selection; empty when everything is selected
    pub fn pills(&self) -> Vec<FilterPill> {
        if self.is_all_selected() {
            return Vec::new();
        }
        self.checked
            .iter()
            .map(|v| FilterPill {
                facet: v.facet(),
                facet_label: v.facet().label(),
                value: v.value(),
                label: v.label(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_facet_has_values() {
        assert_eq!(Facet::Cost.values().count(), 3);
        assert_eq!(Facet::Grade.values().count(), 6);
        assert_eq!(Facet::Subject.values().count(), 8);
    }

    #[test]
    fn test_free_excludes_freemium() {
        assert!(FacetValue::Free.matches("free,math"));
        assert!(!FacetValue::Free.matches("freemium,math"));
        assert!(FacetValue::Freemium.matches("freemium"));
        assert!(FacetValue::Paid.matches("premium"));
    }

    #[test]
    fn test_grade_and_subject_predicates() {
        assert!(FacetValue::High.matches("9-12"));
        assert!(!FacetValue::High.matches("high"));
        assert!(FacetValue::Ela.matches("reading,k-5"));
        assert!(FacetValue::Cs.matches("computer science"));
        assert!(FacetValue::Languages.matches("spanish"));
    }

    #[test]
    fn test_parse_values() {
        assert_eq!("math".parse::<FacetValue>(), Ok(FacetValue::Math));
        assert_eq!("grade:k-12".parse::<FacetValue>(), Ok(FacetValue::K12));
        assert_eq!("Cost:Paid".parse::<FacetValue>(), Ok(FacetValue::Paid));
        assert!("cost:math".parse::<FacetValue>().is_err());
        assert!("bogus".parse::<FacetValue>().is_err());
    }

    #[test]
    fn test_all_selected_is_pass_through() {
        let selection = FacetSelection::all();
        assert!(selection.is_all_selected());
        assert!(selection.matches(""));
        assert!(selection.pills().is_empty());
    }

    #[test]
    fn test_empty_group_passes() {
        let selection = FacetSelection::only([FacetValue::Math]);
        assert!(selection.matches("math,paid"));
        assert!(!selection.matches("science"));
    }

    #[test]
    fn test_groups_are_conjunctive() {
        let selection = FacetSelection::only([FacetValue::Free, FacetValue::Science]);
        assert!(selection.matches("free,science"));
        assert!(!selection.matches("free,math"));
        assert!(!selection.matches("paid,science"));
    }

    #[test]
    fn test_nothing_selected_passes_everything() {
        assert!(FacetSelection::none().matches("anything"));
    }

    #[test]
    fn test_pills_follow_checkbox_order() {
        let mut selection = FacetSelection::all();
        selection.set(FacetValue::Paid, false);

        let pills = selection.pills();
        assert_eq!(pills.len(), FacetValue::all().len() - 1);
        assert_eq!(pills[0].facet_label, "Cost");
        assert_eq!(pills[0].label, "Free");
        assert!(pills.iter().all(|p| p.value != "paid"));
    }
}
