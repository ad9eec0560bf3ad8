// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use crate::transit_data::{Route, TransitData};
use tracing::warn;

pub enum RouteFilter<'a> {
    Line(&'a str),
    Route(&'a str),
    Mode(&'a str),
}

impl<'a> RouteFilter<'a> {
    pub fn applies_on(&self, route: Route, data: &TransitData) -> bool {
        let route_data = data.route_data(route);
        match self {
            RouteFilter::Line(code) => data.line_data(route_data.line).external_code == *code,
            RouteFilter::Route(code) => route_data.external_code == *code,
            RouteFilter::Mode(code) => data.mode_data(route_data.mode).external_code == *code,
        }
    }
}

/// Identifiers excluded from a search, matched against external codes.
/// Recognized kinds are `line`, `route` and `mode` ; unknown kinds are
/// ignored with a warning.
pub struct Filters<'a> {
    forbidden: Vec<RouteFilter<'a>>,
}

impl<'a> Filters<'a> {
    pub fn empty() -> Self {
        Self {
            forbidden: Vec::new(),
        }
    }

    pub fn new<T: AsRef<str>>(forbidden: &'a [(T, T)]) -> Self {
        let mut filters = Vec::new();
        for (kind, code) in forbidden {
            match kind.as_ref() {
                "line" => filters.push(RouteFilter::Line(code.as_ref())),
                "route" => filters.push(RouteFilter::Route(code.as_ref())),
                "mode" => filters.push(RouteFilter::Mode(code.as_ref())),
                unknown => {
                    warn!("unknown forbidden id kind `{}`, ignored", unknown);
                }
            }
        }
        Self { forbidden: filters }
    }

    /// If one forbidden filter applies, then the route is forbidden.
    pub fn is_route_forbidden(&self, route: Route, data: &TransitData) -> bool {
        self.forbidden
            .iter()
            .any(|filter| filter.applies_on(route, data))
    }
}
