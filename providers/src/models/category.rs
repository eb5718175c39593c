// Copyright 2022 Xayn AG
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Categories of the top headlines.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[display(fmt = "business")]
    Business,
    #[display(fmt = "entertainment")]
    Entertainment,
    #[display(fmt = "general")]
    General,
    #[display(fmt = "health")]
    Health,
    #[display(fmt = "science")]
    Science,
    #[display(fmt = "sports")]
    Sports,
    #[display(fmt = "technology")]
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// Title of the category section.
    pub fn title(self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::General => "General",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Technology => "Technology",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownCategory(name.into()))
    }
}
