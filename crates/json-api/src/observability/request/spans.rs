//! Route labels for spans and metrics.

use uuid::Uuid;

/// Replace UUID path segments so per-resource paths share one label.
pub(super) fn normalise_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_collapsed() {
        let path = format!("/products/{}", Uuid::now_v7());

        assert_eq!(normalise_route(&path), "/products/{uuid}");
    }

    #[test]
    fn static_routes_are_unchanged() {
        assert_eq!(normalise_route("/"), "/");
        assert_eq!(normalise_route("/cart/checkout"), "/cart/checkout");
    }
}
