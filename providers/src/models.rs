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


mod category;
mod query;
mod response;

pub(crate) use self::response::ErrorResponse;
pub use self::{
    category::Category,
    query::{Endpoint, ParamValue, QueryDefaults, QueryIntent, QueryText, RequestParams},
    response::{
        Article,
        ArticleSource,
        ArticlesResponse,
        HeadlinesResponse,
        NewsSource,
        SourcesResponse,
    },
};
