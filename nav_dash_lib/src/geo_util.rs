use geo_types::Point;

/// Mean Earth radius in km.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in km between two points, haversine formula.
pub fn haversine_distance_km(p1: Point, p2: Point) -> f64 {
    let (lat1, lat2) = (p1.y().to_radians(), p2.y().to_radians());
    let d_lat = (p2.y() - p1.y()).to_radians();
    let d_lon = (p2.x() - p1.x()).to_radians();

    let a = f64::sin(d_lat / 2.).powi(2)
        + f64::cos(lat1) * f64::cos(lat2) * f64::sin(d_lon / 2.).powi(2);
    let c = 2. * f64::atan2(a.sqrt(), (1. - a).sqrt());

    EARTH_RADIUS_KM * c
}
