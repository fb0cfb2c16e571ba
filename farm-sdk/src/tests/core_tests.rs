//! Tests for core abstractions
//!
//! These tests verify request shaping before anything reaches the transport.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::{prune_absent, ApiRequest, FilePart, Method, RequestBody};
    use crate::models::{ChemRecoRequest, PolicyMatchRequest, QueryRequest};

    #[test]
    fn test_prune_absent_is_recursive() {
        let value = json!({
            "state": "Karnataka",
            "crop": null,
            "profile": {"land_size": null, "farmer_type": "small"},
            "history": [{"note": null, "year": 2023}, null, 4]
        });

        assert_eq!(
            prune_absent(value),
            json!({
                "state": "Karnataka",
                "profile": {"farmer_type": "small"},
                "history": [{"year": 2023}, null, 4]
            })
        );
    }

    #[test]
    fn test_json_body_skips_absent_fields() {
        let request = ApiRequest::post("/api/policy-match")
            .json(&PolicyMatchRequest::new("Karnataka"))
            .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.body, RequestBody::Json(json!({"state": "Karnataka"})));
    }

    #[test]
    fn test_query_and_chem_bodies() {
        let query = ApiRequest::post("/api/query")
            .json(&QueryRequest::new("Best time to sow mustard?").lang("hi").image_id("img_9"))
            .unwrap();
        assert_eq!(
            query.body,
            RequestBody::Json(json!({"text": "Best time to sow mustard?", "lang": "hi", "image_id": "img_9"}))
        );

        let chem = ApiRequest::post("/api/chem-reco")
            .json(&ChemRecoRequest::new("rice", "brown spots").crop_stage("tillering"))
            .unwrap();
        assert_eq!(
            chem.body,
            RequestBody::Json(json!({"crop": "rice", "symptom": "brown spots", "crop_stage": "tillering"}))
        );
    }

    #[test]
    fn test_query_opt_skips_none() {
        let request = ApiRequest::get("/api/weather")
            .query_opt("state", Some("Punjab"))
            .query_opt("district", None::<&str>)
            .query_opt("limit", Some(5));

        assert_eq!(
            request.query,
            vec![
                ("state".to_string(), "Punjab".to_string()),
                ("limit".to_string(), "5".to_string())
            ]
        );
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_multipart_drops_absent_fields() {
        let file = FilePart {
            field: "file".to_string(),
            file_name: "leaf.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        };
        let request = ApiRequest::post("/api/upload-image").multipart(
            vec![
                ("user_id".to_string(), None),
                ("crop".to_string(), Some("maize".to_string())),
            ],
            file.clone(),
        );

        assert_eq!(
            request.body,
            RequestBody::Multipart {
                fields: vec![("crop".to_string(), "maize".to_string())],
                file,
            }
        );
    }

    #[test]
    fn test_each_request_gets_its_own_id() {
        let a = ApiRequest::get("/api/health");
        let b = ApiRequest::get("/api/health");

        assert_ne!(a.request_id, b.request_id);
        assert!(uuid::Uuid::parse_str(&a.request_id).is_ok());
        assert_eq!(Method::Get.to_string(), "GET");
    }
}
