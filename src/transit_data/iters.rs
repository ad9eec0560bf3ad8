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

use super::data::{
    FootPath, RoutePoint, RoutePointConnection, StopArea, StopPoint, TransitData,
};

impl TransitData {
    pub fn route_points_of_stop_point(
        &self,
        stop_point: StopPoint,
    ) -> impl Iterator<Item = RoutePoint> + '_ {
        self.stop_points[stop_point.idx].route_point_list.iter().copied()
    }

    pub fn stop_points_of_stop_area(
        &self,
        stop_area: StopArea,
    ) -> impl Iterator<Item = StopPoint> + '_ {
        self.stop_areas[stop_area.idx].stop_point_list.iter().copied()
    }

    /// The outgoing footpath slice of `stop_point`, as prepared upstream :
    /// sorted by destination then duration so that equal durations are
    /// consecutive.
    pub fn footpaths_of_stop_point(&self, stop_point: StopPoint) -> &[FootPath] {
        let (offset, count) = self.footpath_index[stop_point.idx];
        &self.foot_paths[offset..offset + count]
    }

    pub fn outgoing_connections(&self, route_point: RoutePoint) -> &[RoutePointConnection] {
        &self.connections_forward[route_point.idx]
    }

    pub fn incoming_connections(&self, route_point: RoutePoint) -> &[RoutePointConnection] {
        &self.connections_backward[route_point.idx]
    }
}
