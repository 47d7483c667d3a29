// ── Member selectors ──

use std::rc::Rc;

use crate::model::{Device, Site};

/// Which members of a collection to pick.
#[derive(Debug)]
pub enum Selector<T> {
    /// Every member.
    All,
    /// Members whose title is in the list.
    ByNames(Vec<String>),
    /// One specific entity.
    BySingle(Rc<T>),
}

pub type SiteSelector = Selector<Site>;
pub type DeviceSelector = Selector<Device>;

impl<T> Selector<T> {
    pub fn by_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ByNames(names.into_iter().map(Into::into).collect())
    }
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::ByNames(names) => Self::ByNames(names.clone()),
            Self::BySingle(member) => Self::BySingle(Rc::clone(member)),
        }
    }
}

/// A single name is shorthand for a one-element name list.
impl<T> From<&str> for Selector<T> {
    fn from(name: &str) -> Self {
        Self::ByNames(vec![name.to_owned()])
    }
}

impl<T> From<String> for Selector<T> {
    fn from(name: String) -> Self {
        Self::ByNames(vec![name])
    }
}

impl<T> From<Vec<String>> for Selector<T> {
    fn from(names: Vec<String>) -> Self {
        Self::ByNames(names)
    }
}

impl<T> From<&[&str]> for Selector<T> {
    fn from(names: &[&str]) -> Self {
        Self::by_names(names.iter().copied())
    }
}

impl<T> From<Rc<T>> for Selector<T> {
    fn from(member: Rc<T>) -> Self {
        Self::BySingle(member)
    }
}
