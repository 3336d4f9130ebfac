mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::http::TestApp;
use common::{ensure_config, single_column_csv};
use patterncraft::test_utils::create_test_storage;
use serde_json::Value;
use serial_test::serial;

fn fibonacci_csv() -> String {
    single_column_csv([1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0])
}

fn oscillating_csv() -> String {
    single_column_csv((0..40).map(|i| if i % 2 == 0 { 100.0 } else { 200.0 }))
}

fn growth_csv() -> String {
    single_column_csv((1..=12).map(|i| 3f64.powi(i)))
}

async fn test_app() -> Result<TestApp> {
    ensure_config();
    Ok(TestApp::new(create_test_storage().await?).await)
}

mod upload_tests {
    use super::*;

    #[tokio::test]
    #[serial]
    async fn test_upload_classifies_and_stores() -> Result<()> {
        let app = test_app().await?;

        let response = app
            .upload(Some("alice"), "series.csv", "text/csv", fibonacci_csv().as_bytes())
            .await?;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json()?;
        assert_eq!(body["message"], "File uploaded and analyzed successfully!");
        assert_eq!(body["pattern"]["type"], "fibonacci");
        assert_eq!(body["pattern"]["confidence"], "85%");
        assert_eq!(body["pattern"]["dataPoints"], 10);

        let id = body["id"].as_str().unwrap().to_string();
        let response = app
            .get(&format!("/upload/patterns/{}", id), Some("alice"))
            .await?;
        response.assert_status(StatusCode::OK);
        let record: Value = response.json()?;
        assert_eq!(record["id"], id.as_str());
        assert_eq!(record["owner_id"], "alice");
        assert_eq!(record["original_name"], "series.csv");
        assert!(record["filename"].as_str().unwrap().ends_with("-series.csv"));
        assert_eq!(record["pattern_type"], "fibonacci");
        assert_eq!(record["row_count"], 10);
        assert_eq!(record["numeric_value_count"], 10);
        assert_eq!(record["summary"]["min"], 1.0);
        assert_eq!(record["summary"]["max"], 55.0);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_detected_patterns() -> Result<()> {
        let app = test_app().await?;

        let cases = [
            (oscillating_csv(), "sine_wave", "90%"),
            (growth_csv(), "exponential", "88%"),
            (single_column_csv([50.0; 10]), "unknown", "50%"),
        ];
        for (csv, expected_type, expected_confidence) in cases {
            let response = app
                .upload(Some("alice"), "data.csv", "text/csv", csv.as_bytes())
                .await?;
            response.assert_status(StatusCode::OK);
            let body: Value = response.json()?;
            assert_eq!(body["pattern"]["type"], expected_type);
            assert_eq!(body["pattern"]["confidence"], expected_confidence);
        }

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_filename_hint_wins_over_data() -> Result<()> {
        let app = test_app().await?;

        // Oscillating data, but the name says growth
        let response = app
            .upload(
                Some("alice"),
                "viral_growth.csv",
                "text/csv",
                oscillating_csv().as_bytes(),
            )
            .await?;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json()?;
        assert_eq!(body["pattern"]["type"], "exponential");
        assert_eq!(body["pattern"]["dataPoints"], 40);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_requires_owner() -> Result<()> {
        let app = test_app().await?;

        let response = app
            .upload(None, "series.csv", "text/csv", fibonacci_csv().as_bytes())
            .await?;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = app.get("/upload/patterns", None).await?;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_rejects_other_files() -> Result<()> {
        let app = test_app().await?;

        let response = app
            .upload(Some("alice"), "report.pdf", "application/pdf", b"%PDF-1.4")
            .await?;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json()?;
        assert_eq!(body["error"], "Only CSV files are allowed!");

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_rejects_unreadable_csv() -> Result<()> {
        ensure_config();
        let directory = tempfile::tempdir()?;
        let app = TestApp::with_upload_directory(
            create_test_storage().await?,
            Some(directory.path().to_path_buf()),
        )
        .await;

        let response = app
            .upload(Some("alice"), "broken.csv", "text/csv", b"value\n1\n\xff\xfe\n")
            .await?;
        response.assert_status(StatusCode::BAD_REQUEST);

        // Nothing was stored
        let response = app.get("/upload/patterns", Some("alice")).await?;
        response.assert_status(StatusCode::OK);
        let records: Vec<Value> = response.json()?;
        assert!(records.is_empty());

        // Nor kept on disk
        let kept_files = std::fs::read_dir(directory.path())?.count();
        assert_eq!(kept_files, 0);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_patterns_are_private() -> Result<()> {
        let app = test_app().await?;

        let response = app
            .upload(Some("alice"), "series.csv", "text/csv", fibonacci_csv().as_bytes())
            .await?;
        let body: Value = response.json()?;
        let id = body["id"].as_str().unwrap().to_string();

        let response = app
            .get(&format!("/upload/patterns/{}", id), Some("bob"))
            .await?;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = app.get("/upload/patterns", Some("bob")).await?;
        let records: Vec<Value> = response.json()?;
        assert!(records.is_empty());

        let response = app.get("/upload/patterns", Some("alice")).await?;
        let records: Vec<Value> = response.json()?;
        assert_eq!(records.len(), 1);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_pattern_id() -> Result<()> {
        let app = test_app().await?;

        let response = app
            .get(
                "/upload/patterns/00000000-0000-0000-0000-000000000000",
                Some("alice"),
            )
            .await?;
        response.assert_status(StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_keeps_file() -> Result<()> {
        ensure_config();
        let directory = tempfile::tempdir()?;
        let app = TestApp::with_upload_directory(
            create_test_storage().await?,
            Some(directory.path().to_path_buf()),
        )
        .await;

        let response = app
            .upload(Some("alice"), "series.csv", "text/csv", fibonacci_csv().as_bytes())
            .await?;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json()?;
        let id = body["id"].as_str().unwrap().to_string();

        let record: Value = app
            .get(&format!("/upload/patterns/{}", id), Some("alice"))
            .await?
            .json()?;
        let stored_path = directory.path().join(record["filename"].as_str().unwrap());
        let stored = std::fs::read_to_string(stored_path)?;
        assert_eq!(stored, fibonacci_csv());

        Ok(())
    }
}

mod classify_tests {
    use super::*;

    #[tokio::test]
    #[serial]
    async fn test_classify_without_storing() -> Result<()> {
        let app = test_app().await?;

        let response = app
            .post_csv("/classify?filename=data.csv", growth_csv().as_bytes())
            .await?;
        response.assert_status(StatusCode::OK);
        let result: Value = response.json()?;
        assert_eq!(result["pattern_type"], "exponential");
        assert_eq!(result["confidence"], 0.88);
        assert_eq!(result["row_count"], 12);
        assert_eq!(result["summary"]["min"], 3.0);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_classify_uses_filename_hint() -> Result<()> {
        let app = test_app().await?;

        let response = app
            .post_csv("/classify?filename=uploads/Ocean_Tide.csv", b"level\n")
            .await?;
        response.assert_status(StatusCode::OK);
        let result: Value = response.json()?;
        assert_eq!(result["pattern_type"], "sine_wave");
        assert_eq!(result["row_count"], 0);
        assert_eq!(result["summary"]["min"], Value::Null);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_classify_ragged_rows() -> Result<()> {
        let app = test_app().await?;

        let csv = "label,value\na,1\nb,1,extra\nc,2\nd,3\ne,5\n";
        let response = app.post_csv("/classify", csv.as_bytes()).await?;
        response.assert_status(StatusCode::OK);
        let result: Value = response.json()?;
        assert_eq!(result["pattern_type"], "fibonacci");
        assert_eq!(result["row_count"], 5);

        Ok(())
    }
}
