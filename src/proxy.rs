//! Generic constructors for newtypes

#![allow(non_snake_case)]

use std::borrow::Cow;
use std::path::Path;

/// Generic constructor for `Label`
#[inline(always)]
pub fn Label<S>(string: S) -> crate::Label
where
    S: Into<Cow<'static, str>>,
{
    crate::Label(string.into())
}

/// Generic constructor for `Legend`
#[inline(always)]
pub fn Legend<I>(entries: I) -> crate::Legend
where
    I: IntoIterator,
    I::Item: Into<Cow<'static, str>>,
{
    crate::Legend(entries.into_iter().map(Into::into).collect())
}

/// Generic constructor for `Output`
#[inline(always)]
pub fn Output<P>(path: P) -> crate::Output
where
    P: Into<Cow<'static, Path>>,
{
    crate::Output(path.into())
}

/// Generic constructor for `Title`
#[inline(always)]
pub fn Title<S>(string: S) -> crate::Title
where
    S: Into<Cow<'static, str>>,
{
    crate::Title(string.into())
}
