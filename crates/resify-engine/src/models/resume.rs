use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::dates::{DateError, DateRange};
use crate::scalar;

/// Keys a record carries beyond its known fields.
///
/// Flattened into its parent, so templates see `statement` next to `me`
/// rather than under a separate `meta` key.
pub type Meta = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub me: Me,
    #[serde(default)]
    pub profiles: Profiles,
    #[serde(rename = "work", default, skip_serializing_if = "Vec::is_empty")]
    pub employment: Vec<Employment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<Education>,

    #[serde(flatten)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Me {
    /// Names in display order, e.g. chosen name first.
    #[serde(rename = "ordered", default)]
    pub order: Vec<String>,
    #[serde(default, deserialize_with = "scalar::text")]
    pub chosen: String,
    #[serde(default, deserialize_with = "scalar::text")]
    pub phone: String,
    #[serde(default, deserialize_with = "scalar::text")]
    pub email: String,

    #[serde(flatten)]
    pub meta: Meta,
}

/// Online profiles keyed by name, plus the order to list them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profiles {
    #[serde(rename = ".order", default)]
    pub order: Vec<String>,
    #[serde(flatten)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    #[serde(flatten)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employment {
    #[serde(default, deserialize_with = "scalar::text")]
    pub title: String,
    #[serde(default, skip_serializing_if = "DateRange::is_unset")]
    pub when: DateRange,
    #[serde(rename = "where", default)]
    pub place: Place,
    #[serde(
        rename = "desc",
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,

    #[serde(flatten)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "where", default)]
    pub place: Place,
    #[serde(default, skip_serializing_if = "DateRange::is_unset")]
    pub when: DateRange,
    #[serde(
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub received: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(
        rename = "desc",
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,

    #[serde(flatten)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub place: String,

    #[serde(flatten)]
    pub meta: Meta,
}

impl Place {
    pub fn new(name: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            place: place.into(),
            meta: Meta::new(),
        }
    }
}

impl Resume {
    /// A filled-in record showing every supported field.
    pub fn example() -> Result<Self, DateError> {
        let when = DateRange::parse("2010-08", "2015-12")?;

        let profiles = [
            ("github", "https://github.com/username", "GitHub"),
            ("mastodon", "https://mastodon.social/@username", "Mastodon"),
        ];

        Ok(Self {
            me: Me {
                order: vec!["Chosen".into(), "Ordered".into(), "Name".into()],
                chosen: "Chosen Name".into(),
                phone: "+12345678901".into(),
                email: "you@hostname.tld".into(),
                meta: Meta::new(),
            },
            profiles: Profiles {
                order: profiles.iter().map(|(name, ..)| name.to_string()).collect(),
                profiles: profiles
                    .iter()
                    .map(|&(name, url, label)| {
                        let profile = Profile {
                            url: url.into(),
                            label: label.into(),
                            meta: Meta::new(),
                        };
                        (name.to_string(), profile)
                    })
                    .collect(),
            },
            employment: vec![Employment {
                title: "Software Engineer".into(),
                when: when.clone(),
                place: Place::new("Example Studios", "Springfield, OR"),
                description: "Built and ran the request pipeline for \
                    ((https://example.com/ our storefront)), serving a few \
                    billion requests a day."
                    .into(),
                meta: Meta::from([("manager".to_string(), Value::from("A. Manager"))]),
            }],
            education: vec![Education {
                place: Place::new("State University", "Springfield, OR"),
                when,
                received: "B.Sc. in Computer Science".into(),
                fields: vec!["Computer Science".into(), "History".into()],
                description: "Notable achievements at this institution.".into(),
                meta: Meta::new(),
            }],
            meta: Meta::from([(
                "statement".to_string(),
                Value::from("A short personal statement."),
            )]),
        })
    }
}
