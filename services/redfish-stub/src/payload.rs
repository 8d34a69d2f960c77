use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

/// Redfish ServiceRoot returned for every request.
pub const SERVICE_ROOT: &str = r##"{
    "@odata.id": "/redfish/v1",
    "@odata.type": "#ServiceRoot.v1_6_0.ServiceRoot",
    "AccountService": {
        "@odata.id": "/redfish/v1/AccountService"
    },
    "Chassis": {
        "@odata.id": "/redfish/v1/Chassis"
    },
    "Description": "The Redfish ServiceRoot",
    "JsonSchemas": {
        "@odata.id": "/redfish/v1/JsonSchemas"
    },
    "Managers": {
        "@odata.id": "/redfish/v1/Managers"
    },
    "Name": "Service Root",
    "RedfishVersion": "2019.1",
    "Systems": {
        "@odata.id": "/redfish/v1/Systems"
    },
    "UpdateService": {
        "@odata.id": "/redfish/v1/UpdateService"
    }
}
"##;

pub(crate) async fn service_root() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        SERVICE_ROOT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP_LEVEL_KEYS: [&str; 11] = [
        "@odata.id",
        "@odata.type",
        "AccountService",
        "Chassis",
        "Description",
        "JsonSchemas",
        "Managers",
        "Name",
        "RedfishVersion",
        "Systems",
        "UpdateService",
    ];

    #[test]
    fn service_root_is_valid_json_with_expected_keys() {
        let value: serde_json::Value = serde_json::from_str(SERVICE_ROOT).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, TOP_LEVEL_KEYS);
        assert_eq!(object["RedfishVersion"], "2019.1");
        assert_eq!(object["Name"], "Service Root");
    }

    #[test]
    fn links_point_below_service_root() {
        let value: serde_json::Value = serde_json::from_str(SERVICE_ROOT).unwrap();
        for key in [
            "AccountService",
            "Chassis",
            "JsonSchemas",
            "Managers",
            "Systems",
            "UpdateService",
        ] {
            assert_eq!(
                value[key]["@odata.id"],
                format!("/redfish/v1/{key}"),
                "unexpected link for {key}"
            );
        }
    }
}
