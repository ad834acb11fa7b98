//! Wire shapes of the photo API and their validation.
//!
//! Every field is deserialized as optional so that a missing or null value
//! surfaces as a [`ValidationError`] naming the field, instead of a generic
//! serde message. Conversion into the internal record types happens here
//! and nowhere else.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use snapfeed_shared::{
    ImageId, ImageRecord, ImageUrls, ProfilePhoto, UserProfile, UserRef, ValidationError,
};

use crate::error::SourceError;

#[derive(Debug, Deserialize)]
pub struct WireUser {
    pub username: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireUrls {
    pub raw: Option<String>,
    pub full: Option<String>,
    pub regular: Option<String>,
    pub small: Option<String>,
    pub thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireLocation {
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WirePhoto {
    pub id: Option<String>,
    pub user: Option<WireUser>,
    pub urls: Option<WireUrls>,
    pub likes: Option<i64>,
    pub location: Option<WireLocation>,
    pub alt_description: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireProfileImage {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireProfilePhoto {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub created_at: Option<String>,
    pub urls: Option<WireUrls>,
}

#[derive(Debug, Deserialize)]
pub struct WireProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub followers_count: Option<i64>,
    pub following_count: Option<i64>,
    pub profile_image: Option<WireProfileImage>,
    pub photos: Option<Vec<WireProfilePhoto>>,
}

/// Parse the body of `GET /photos/random?count=n`.
pub fn parse_random_photos(body: &str) -> Result<Vec<ImageRecord>, SourceError> {
    let wire: Vec<WirePhoto> = serde_json::from_str(body)?;
    let records = wire
        .into_iter()
        .map(ImageRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Parse the body of `GET /users/<username>`.
pub fn parse_profile(body: &str) -> Result<UserProfile, SourceError> {
    let wire: WireProfile = serde_json::from_str(body)?;
    Ok(UserProfile::try_from(wire)?)
}

impl TryFrom<WirePhoto> for ImageRecord {
    type Error = ValidationError;

    fn try_from(wire: WirePhoto) -> Result<Self, Self::Error> {
        let id = required("id", wire.id)?;
        let user = wire.user.ok_or(ValidationError::MissingField("user"))?;
        let urls = wire.urls.ok_or(ValidationError::MissingField("urls"))?;
        let likes = count("likes", wire.likes)?;
        let created_at = wire
            .created_at
            .map(|raw| timestamp("created_at", raw))
            .transpose()?;

        Ok(ImageRecord {
            id: ImageId(id),
            user: UserRef {
                username: required("user.username", user.username)?,
                name: non_blank(user.name),
            },
            urls: urls.try_into()?,
            likes,
            location: wire.location.and_then(|loc| non_blank(loc.country)),
            alt_description: non_blank(wire.alt_description),
            description: non_blank(wire.description),
            created_at,
            comments: Vec::new(),
        })
    }
}

impl TryFrom<WireUrls> for ImageUrls {
    type Error = ValidationError;

    fn try_from(wire: WireUrls) -> Result<Self, Self::Error> {
        let regular = required("urls.regular", wire.regular)?;
        Ok(ImageUrls {
            raw: required("urls.raw", wire.raw)?,
            full: required("urls.full", wire.full)?,
            small: non_blank(wire.small).unwrap_or_else(|| regular.clone()),
            regular,
            thumb: required("urls.thumb", wire.thumb)?,
        })
    }
}

impl TryFrom<WireProfilePhoto> for ProfilePhoto {
    type Error = ValidationError;

    fn try_from(wire: WireProfilePhoto) -> Result<Self, Self::Error> {
        let created_at = required("photos.created_at", wire.created_at)?;
        Ok(ProfilePhoto {
            id: ImageId(required("photos.id", wire.id)?),
            slug: non_blank(wire.slug),
            created_at: timestamp("photos.created_at", created_at)?,
            urls: wire
                .urls
                .ok_or(ValidationError::MissingField("photos.urls"))?
                .try_into()?,
        })
    }
}

impl TryFrom<WireProfile> for UserProfile {
    type Error = ValidationError;

    fn try_from(wire: WireProfile) -> Result<Self, Self::Error> {
        let image = wire
            .profile_image
            .ok_or(ValidationError::MissingField("profile_image"))?;
        let profile_image = non_blank(image.large)
            .or_else(|| non_blank(image.medium))
            .or_else(|| non_blank(image.small))
            .ok_or(ValidationError::MissingField("profile_image.large"))?;

        let photos = wire
            .photos
            .ok_or(ValidationError::MissingField("photos"))?
            .into_iter()
            .map(ProfilePhoto::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserProfile {
            username: required("username", wire.username)?,
            first_name: wire.first_name.unwrap_or_default(),
            last_name: non_blank(wire.last_name),
            bio: non_blank(wire.bio),
            followers_count: count("followers_count", wire.followers_count)?,
            following_count: count("following_count", wire.following_count)?,
            profile_image,
            photos,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(v) if v.trim().is_empty() => Err(ValidationError::EmptyField(field)),
        Some(v) => Ok(v),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Absent counters are treated as zero; the API omits them on some endpoints.
fn count(field: &'static str, value: Option<i64>) -> Result<u32, ValidationError> {
    let value = value.unwrap_or(0);
    if value < 0 {
        return Err(ValidationError::NegativeCount { field, value });
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

fn timestamp(field: &'static str, raw: String) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidTimestamp { field, value: raw })
}
