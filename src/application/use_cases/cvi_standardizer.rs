// ============================================================
// CVI STANDARDIZER
// ============================================================
// Map raw creative-visual-intelligence exports onto the fixed
// 23-column header set

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::application::use_cases::post_matrix::SourceFile;
use crate::domain::table::{CellValue, Row, Table};

/// Pass-through annotation columns copied verbatim when present
const ANNOTATION_COLUMNS: &[&str] = &[
    "Speech to text Transcription",
    "Theme",
    "Detailed Visual Description",
    "On-screen Text Overlays",
    "Background Setting",
    "Human Activity",
    "CTA Text",
    "Claims",
    "Ingredients on pack",
    "Product",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CviStats {
    pub total_rows: usize,
    pub by_source: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CviOutcome {
    pub data: Table,
    pub stats: CviStats,
}

/// Standardize raw CVI export files into the shared header set, with a
/// running serial number across files.
///
/// Source detection per file: when the first row carries a `content_type`
/// column, each row's source comes from that value (substring match on
/// "TikTok"/"Instagram"); otherwise the whole file's source is inferred
/// from "TT"/"IG" markers in the upper-cased file label.
pub fn process_cvi_files(files: &[SourceFile]) -> CviOutcome {
    let mut data = Vec::new();
    let mut serial_number: i64 = 1;

    for file in files {
        let per_row_source = file
            .table
            .first()
            .is_some_and(|row| row.has_column("content_type"));
        let file_source = source_from_label(&file.source_label);

        let username_column = match file
            .table
            .first()
            .is_some_and(|row| row.has_column("platform_username"))
        {
            true => "platform_username",
            false => "username",
        };

        for row in &file.table {
            let source = match per_row_source {
                true => source_from_content_type(&row.text("content_type")),
                false => file_source.clone(),
            };

            let likes = row.number("like_count");
            let comments = row.number("comment_count");
            let followers = row.number("influencer_follower_count");
            let engagement_rate = match followers > 0.0 {
                true => round2((likes + comments) / followers * 100.0),
                false => 0.0,
            };

            let duration = row.number("duration");
            let type_of_post = match duration > 0.0 {
                true => "Video",
                false => "Image",
            };
            let view_count = row.number("view_count");
            let video_plays = match view_count != 0.0 {
                true => CellValue::from(view_count),
                false => CellValue::Empty,
            };

            let mut standardized = Row::from_pairs(vec![
                ("Serial Number".to_string(), serial_number.into()),
                ("Source".to_string(), source.into()),
                ("URL".to_string(), row.text("original_url").into()),
                (
                    "ownerUsername".to_string(),
                    row.text(username_column).into(),
                ),
                ("Followers".to_string(), followers.into()),
                ("Type of Post".to_string(), type_of_post.into()),
                ("Brand Name".to_string(), row.text("Brand").into()),
                ("likesCount".to_string(), likes.into()),
                ("commentsCount".to_string(), comments.into()),
                ("Engagement".to_string(), engagement_rate.into()),
                ("Video Plays".to_string(), video_plays),
                ("caption".to_string(), row.text("caption").into()),
                ("videoDuration".to_string(), duration.into()),
            ]);
            for column in ANNOTATION_COLUMNS {
                standardized.set(column.to_string(), CellValue::text(row.text(column)));
            }

            serial_number += 1;
            data.push(standardized);
        }
    }

    let mut stats = CviStats {
        total_rows: data.len(),
        ..Default::default()
    };
    for row in &data {
        *stats.by_source.entry(row.text("Source")).or_insert(0) += 1;
    }

    debug!(
        files = files.len(),
        rows = stats.total_rows,
        "Standardized CVI exports"
    );

    CviOutcome { data, stats }
}

fn source_from_content_type(content_type: &str) -> String {
    if content_type.contains("TikTok") {
        "TikTok".to_string()
    } else if content_type.contains("Instagram") {
        "Instagram".to_string()
    } else {
        "Unknown".to_string()
    }
}

fn source_from_label(label: &str) -> String {
    let upper = label.to_uppercase();
    if upper.contains("TT") {
        "TikTok".to_string()
    } else if upper.contains("IG") {
        "Instagram".to_string()
    } else {
        "Unknown".to_string()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(likes: f64, followers: f64, duration: f64) -> Row {
        Row::from_pairs(vec![
            ("original_url".to_string(), "https://a.com/1".into()),
            ("username".to_string(), "alice".into()),
            ("like_count".to_string(), likes.into()),
            ("comment_count".to_string(), 10f64.into()),
            ("influencer_follower_count".to_string(), followers.into()),
            ("duration".to_string(), duration.into()),
            ("view_count".to_string(), 500f64.into()),
            ("caption".to_string(), "hello".into()),
            ("Brand".to_string(), "Acme".into()),
        ])
    }

    #[test]
    fn test_standardized_header_set() {
        let files = vec![SourceFile {
            table: vec![raw_row(90.0, 1000.0, 12.0)],
            source_label: "cvi_IG_batch1.xlsx".to_string(),
        }];
        let result = process_cvi_files(&files);
        let columns: Vec<&str> = result.data[0].columns().collect();
        assert_eq!(columns.len(), 23);
        assert_eq!(columns[0], "Serial Number");
        assert_eq!(*columns.last().unwrap(), "Product");
    }

    #[test]
    fn test_engagement_rate_and_type() {
        let files = vec![SourceFile {
            table: vec![raw_row(90.0, 1000.0, 12.0), raw_row(5.0, 0.0, 0.0)],
            source_label: "TT export".to_string(),
        }];
        let result = process_cvi_files(&files);
        // (90 + 10) / 1000 * 100 = 10
        assert_eq!(result.data[0].number("Engagement"), 10.0);
        assert_eq!(result.data[0].text("Type of Post"), "Video");
        // Zero followers guards the division
        assert_eq!(result.data[1].number("Engagement"), 0.0);
        assert_eq!(result.data[1].text("Type of Post"), "Image");
    }

    #[test]
    fn test_source_from_content_type_column() {
        let mut tiktok = raw_row(1.0, 10.0, 5.0);
        tiktok.set("content_type", "TikTok Video");
        let mut instagram = raw_row(1.0, 10.0, 0.0);
        instagram.set("content_type", "Instagram Reel");
        let mut other = raw_row(1.0, 10.0, 0.0);
        other.set("content_type", "Snapchat Story");

        let files = vec![SourceFile {
            table: vec![tiktok, instagram, other],
            source_label: "mixed.csv".to_string(),
        }];
        let result = process_cvi_files(&files);
        assert_eq!(result.data[0].text("Source"), "TikTok");
        assert_eq!(result.data[1].text("Source"), "Instagram");
        assert_eq!(result.data[2].text("Source"), "Unknown");
        assert_eq!(result.stats.by_source["TikTok"], 1);
        assert_eq!(result.stats.by_source["Unknown"], 1);
    }

    #[test]
    fn test_source_from_filename_fallback() {
        let files = vec![
            SourceFile {
                table: vec![raw_row(1.0, 10.0, 0.0)],
                source_label: "export_tt_march".to_string(),
            },
            SourceFile {
                table: vec![raw_row(1.0, 10.0, 0.0)],
                source_label: "plain_export".to_string(),
            },
        ];
        let result = process_cvi_files(&files);
        assert_eq!(result.data[0].text("Source"), "TikTok");
        assert_eq!(result.data[1].text("Source"), "Unknown");
    }

    #[test]
    fn test_serial_numbers_run_across_files() {
        let files = vec![
            SourceFile {
                table: vec![raw_row(1.0, 10.0, 0.0), raw_row(1.0, 10.0, 0.0)],
                source_label: "IG one".to_string(),
            },
            SourceFile {
                table: vec![raw_row(1.0, 10.0, 0.0)],
                source_label: "IG two".to_string(),
            },
        ];
        let result = process_cvi_files(&files);
        let serials: Vec<f64> = result
            .data
            .iter()
            .map(|r| r.number("Serial Number"))
            .collect();
        assert_eq!(serials, vec![1.0, 2.0, 3.0]);
        assert_eq!(result.stats.total_rows, 3);
    }

    #[test]
    fn test_platform_username_column_preferred() {
        let mut row = raw_row(1.0, 10.0, 0.0);
        row.set("platform_username", "platform_alice");
        let files = vec![SourceFile {
            table: vec![row],
            source_label: "IG".to_string(),
        }];
        let result = process_cvi_files(&files);
        assert_eq!(result.data[0].text("ownerUsername"), "platform_alice");
    }

    #[test]
    fn test_zero_views_leaves_video_plays_blank() {
        let mut row = raw_row(1.0, 10.0, 0.0);
        row.set("view_count", 0f64);
        let files = vec![SourceFile {
            table: vec![row],
            source_label: "IG".to_string(),
        }];
        let result = process_cvi_files(&files);
        assert!(result.data[0].is_blank("Video Plays"));
    }
}
