//! School curriculum presets
//!
//! Builds a subject list for a year group. Years 5 to 9 add their core
//! subjects plus a fixed number of modern foreign languages (MFLs). Years
//! 10 and 11 walk through a five-step GCSE options wizard. Either way the
//! result is a list of subject requests for a batch add.

use crate::error::{AppError, Result};
use crate::store::models::CreateSubjectRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A subject as listed in a preset table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetSubject {
    pub name: &'static str,
    pub color: &'static str,
    pub has_book: bool,
}

const fn preset(name: &'static str, color: &'static str, has_book: bool) -> PresetSubject {
    PresetSubject {
        name,
        color,
        has_book,
    }
}

impl PresetSubject {
    fn to_request(self) -> CreateSubjectRequest {
        CreateSubjectRequest {
            name: self.name.to_string(),
            color: self.color.to_string(),
            has_book: self.has_book,
            teacher: None,
            room: None,
        }
    }
}

const YEAR_5: &[PresetSubject] = &[
    preset("English", "#6bcfd5", true),
    preset("Maths", "#d5806b", true),
    preset("Science", "#9c5b27", true),
    preset("Humanities", "#cf6bd5", true),
    preset("Art", "#27a69c", false),
    preset("Music", "#b58f3c", false),
    preset("PE", "#8c3c3c", false),
    preset("Library", "#a65d27", false),
    preset("Spelling/Reading", "#d59c6b", true),
    preset("Computing", "#6bd59c", true),
];

const YEAR_6: &[PresetSubject] = &[
    preset("English", "#6bcfd5", true),
    preset("Swimming", "#4b87d1", false),
    preset("Humanities", "#cf6bd5", true),
    preset("Maths", "#d5806b", true),
    preset("PE", "#27a69c", false),
    preset("Music Instrumental", "#b58f3c", false),
    preset("Spelling/Reading", "#8c3c3c", true),
    preset("Science", "#9c5b27", true),
    preset("PSHE", "#6b9cd5", false),
    preset("Library", "#a65d27", false),
    preset("Music", "#d59c6b", false),
    preset("Computing", "#6bd59c", true),
    preset("Art", "#cf6b6b", false),
    preset("Design & Technology", "#806bd5", false),
];

// Years 7 and 8 share a timetable
const YEAR_7_8: &[PresetSubject] = &[
    preset("English", "#6bcfd5", true),
    preset("Maths", "#d5806b", true),
    preset("Science", "#9c5b27", true),
    preset("History", "#cf6bd5", true),
    preset("Geography", "#27a69c", true),
    preset("Art", "#b58f3c", false),
    preset("Music", "#8c3c3c", false),
    preset("Drama", "#6b9cd5", false),
    preset("PE", "#a65d27", false),
    preset("Computing", "#d59c6b", true),
    preset("Design & Technology", "#6bd59c", false),
    preset("PSHE", "#cf6b6b", false),
];

const YEAR_9: &[PresetSubject] = &[
    preset("English", "#75d66b", true),
    preset("Math", "#6b9cd6", true),
    preset("Science", "#e36a6a", true),
    preset("Design & Technology", "#b85151", false),
    preset("Art", "#6b7fd6", false),
    preset("Computing", "#b8b4b0", true),
    preset("Geography", "#c26bd6", true),
    preset("History", "#d59b6b", true),
    preset("PE", "#e5ca4b", false),
    preset("Library", "#a1d4e0", false),
    preset("Drama", "#e59ac3", false),
    preset("Music", "#d36bd6", false),
];

const GCSE_CORE: &[PresetSubject] = &[
    preset("English Language", "#6bcfd5", true),
    preset("English Literature", "#4b87d1", true),
    preset("Mathematics", "#d5806b", true),
];

pub const GCSE_SCIENCE: &[PresetSubject] = &[
    preset("Combined Science", "#9c5b27", true),
    preset("Triple Science", "#9c5b27", true),
];

pub const GCSE_HUMANITIES: &[PresetSubject] = &[
    preset("History", "#cf6bd5", true),
    preset("Geography", "#27a69c", true),
];

pub const GCSE_ARTS: &[PresetSubject] = &[
    preset("Art", "#b58f3c", false),
    preset("Drama", "#8c3c3c", false),
    preset("Music", "#6b9cd5", false),
    preset("Design & Technology", "#a65d27", false),
];

pub const GCSE_ADDITIONAL: &[PresetSubject] = &[
    preset("Computer Science", "#d59c6b", true),
    preset("Business", "#6bd59c", true),
    preset("Economics", "#cf6b6b", true),
    preset("PE", "#806bd5", false),
    preset("RE", "#d5806b", true),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearGroup {
    #[serde(rename = "Year 5")]
    Year5,
    #[serde(rename = "Year 6")]
    Year6,
    #[serde(rename = "Year 7")]
    Year7,
    #[serde(rename = "Year 8")]
    Year8,
    #[serde(rename = "Year 9")]
    Year9,
    #[serde(rename = "Year 10")]
    Year10,
    #[serde(rename = "Year 11")]
    Year11,
}

impl YearGroup {
    pub const ALL: [YearGroup; 7] = [
        YearGroup::Year5,
        YearGroup::Year6,
        YearGroup::Year7,
        YearGroup::Year8,
        YearGroup::Year9,
        YearGroup::Year10,
        YearGroup::Year11,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            YearGroup::Year5 => "Year 5",
            YearGroup::Year6 => "Year 6",
            YearGroup::Year7 => "Year 7",
            YearGroup::Year8 => "Year 8",
            YearGroup::Year9 => "Year 9",
            YearGroup::Year10 => "Year 10",
            YearGroup::Year11 => "Year 11",
        }
    }

    /// Subjects every student in the year takes
    pub fn core_subjects(self) -> &'static [PresetSubject] {
        match self {
            YearGroup::Year5 => YEAR_5,
            YearGroup::Year6 => YEAR_6,
            YearGroup::Year7 | YearGroup::Year8 => YEAR_7_8,
            YearGroup::Year9 => YEAR_9,
            YearGroup::Year10 | YearGroup::Year11 => GCSE_CORE,
        }
    }

    pub fn is_gcse(self) -> bool {
        matches!(self, YearGroup::Year10 | YearGroup::Year11)
    }

    /// Number of MFLs picked outside the GCSE wizard
    pub fn required_mfls(self) -> usize {
        match self {
            YearGroup::Year6 | YearGroup::Year7 | YearGroup::Year8 => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for YearGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearGroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        YearGroup::ALL
            .into_iter()
            .find(|year| year.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::validation(format!("Unknown year group: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mfl {
    French,
    Spanish,
    Arabic,
}

impl Mfl {
    pub const ALL: [Mfl; 3] = [Mfl::French, Mfl::Spanish, Mfl::Arabic];

    pub fn as_str(self) -> &'static str {
        match self {
            Mfl::French => "French",
            Mfl::Spanish => "Spanish",
            Mfl::Arabic => "Arabic",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Mfl::French => "#6bcfd5",
            Mfl::Spanish => "#d5806b",
            Mfl::Arabic => "#9c5b27",
        }
    }

    fn subject(self) -> PresetSubject {
        preset(self.as_str(), self.color(), true)
    }
}

impl FromStr for Mfl {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Mfl::ALL
            .into_iter()
            .find(|mfl| mfl.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::validation(format!("Unknown language: {}", s)))
    }
}

/// The subject picker for a year group
#[derive(Debug, Clone, PartialEq)]
pub enum Wizard {
    Mfl(MflSelection),
    Gcse(GcseWizard),
}

impl Wizard {
    pub fn start(year: YearGroup) -> Self {
        tracing::debug!("Starting subject wizard for {}", year);
        if year.is_gcse() {
            Wizard::Gcse(GcseWizard::new(year))
        } else {
            Wizard::Mfl(MflSelection::new(year))
        }
    }
}

/// Language choice for Years 5 to 9
#[derive(Debug, Clone, PartialEq)]
pub struct MflSelection {
    year: YearGroup,
    selected: Vec<Mfl>,
}

impl MflSelection {
    pub fn new(year: YearGroup) -> Self {
        Self {
            year,
            selected: Vec::new(),
        }
    }

    pub fn required(&self) -> usize {
        self.year.required_mfls()
    }

    pub fn selected(&self) -> &[Mfl] {
        &self.selected
    }

    /// Select or deselect a language. Selecting past the required count is ignored.
    pub fn toggle(&mut self, mfl: Mfl) -> bool {
        if let Some(pos) = self.selected.iter().position(|m| *m == mfl) {
            self.selected.remove(pos);
            true
        } else if self.selected.len() < self.required() {
            self.selected.push(mfl);
            true
        } else {
            false
        }
    }

    pub fn confirm(&self) -> Result<Vec<CreateSubjectRequest>> {
        let required = self.required();
        if self.selected.len() != required {
            return Err(AppError::validation(format!(
                "Please select exactly {} MFL{}",
                required,
                if required > 1 { "s" } else { "" }
            )));
        }

        Ok(self
            .year
            .core_subjects()
            .iter()
            .copied()
            .chain(self.selected.iter().map(|mfl| mfl.subject()))
            .map(PresetSubject::to_request)
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GcseStep {
    Science = 1,
    Humanities = 2,
    Mfl = 3,
    Arts = 4,
    Additional = 5,
}

impl GcseStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    fn next(self) -> Option<GcseStep> {
        match self {
            GcseStep::Science => Some(GcseStep::Humanities),
            GcseStep::Humanities => Some(GcseStep::Mfl),
            GcseStep::Mfl => Some(GcseStep::Arts),
            GcseStep::Arts => Some(GcseStep::Additional),
            GcseStep::Additional => None,
        }
    }
}

/// Five-step GCSE options picker for Years 10 and 11
#[derive(Debug, Clone, PartialEq)]
pub struct GcseWizard {
    year: YearGroup,
    step: GcseStep,
    science: Option<PresetSubject>,
    humanities: Option<PresetSubject>,
    mfl: Option<Mfl>,
    arts: Vec<PresetSubject>,
    additional: Vec<PresetSubject>,
}

impl GcseWizard {
    pub fn new(year: YearGroup) -> Self {
        Self {
            year,
            step: GcseStep::Science,
            science: None,
            humanities: None,
            mfl: None,
            arts: Vec::new(),
            additional: Vec::new(),
        }
    }

    pub fn step(&self) -> GcseStep {
        self.step
    }

    pub fn select_science(&mut self, name: &str) -> Result<()> {
        self.science = Some(find_option(GCSE_SCIENCE, name)?);
        Ok(())
    }

    pub fn select_humanities(&mut self, name: &str) -> Result<()> {
        self.humanities = Some(find_option(GCSE_HUMANITIES, name)?);
        Ok(())
    }

    /// `None` means no language
    pub fn select_mfl(&mut self, mfl: Option<Mfl>) {
        self.mfl = mfl;
    }

    pub fn toggle_arts(&mut self, name: &str) -> Result<()> {
        toggle_option(&mut self.arts, find_option(GCSE_ARTS, name)?);
        Ok(())
    }

    pub fn toggle_additional(&mut self, name: &str) -> Result<()> {
        toggle_option(&mut self.additional, find_option(GCSE_ADDITIONAL, name)?);
        Ok(())
    }

    /// Validate the current step and move on
    ///
    /// Returns the subject list once the last step is passed.
    pub fn next(&mut self) -> Result<Option<Vec<CreateSubjectRequest>>> {
        match self.step {
            GcseStep::Science if self.science.is_none() => {
                return Err(AppError::validation("Please select a science option"));
            }
            GcseStep::Humanities if self.humanities.is_none() => {
                return Err(AppError::validation("Please select a humanities option"));
            }
            GcseStep::Arts if self.arts.is_empty() => {
                return Err(AppError::validation(
                    "Please select at least one arts/performance subject",
                ));
            }
            _ => {}
        }

        match self.step.next() {
            Some(step) => {
                self.step = step;
                Ok(None)
            }
            None => self.confirm().map(Some),
        }
    }

    /// Core subjects plus every chosen option
    pub fn confirm(&self) -> Result<Vec<CreateSubjectRequest>> {
        let (Some(science), Some(humanities)) = (self.science, self.humanities) else {
            return Err(AppError::validation("Please complete the required options"));
        };
        if self.arts.is_empty() {
            return Err(AppError::validation(
                "Please select at least one arts/performance subject",
            ));
        }

        let mut subjects: Vec<PresetSubject> = self.year.core_subjects().to_vec();
        subjects.push(science);
        subjects.push(humanities);
        subjects.extend(self.mfl.map(Mfl::subject));
        subjects.extend(self.arts.iter().copied());
        subjects.extend(self.additional.iter().copied());

        Ok(subjects.into_iter().map(PresetSubject::to_request).collect())
    }
}

fn find_option(options: &[PresetSubject], name: &str) -> Result<PresetSubject> {
    let name = name.trim();
    options
        .iter()
        .find(|option| option.name.eq_ignore_ascii_case(name))
        .copied()
        .ok_or_else(|| AppError::validation(format!("Not an available option: {}", name)))
}

fn toggle_option(chosen: &mut Vec<PresetSubject>, option: PresetSubject) {
    match chosen.iter().position(|c| c.name == option.name) {
        Some(pos) => {
            chosen.remove(pos);
        }
        None => chosen.push(option),
    }
}
