use actix_cors::Cors;
use actix_web::{delete, dev::Server, get, post, put, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::application::use_cases::brand_metrics::create_data_points_summary;
use crate::application::use_cases::classifier::KeywordClassifier;
use crate::application::use_cases::cvi_standardizer::process_cvi_files;
use crate::application::use_cases::missing_posts::find_missing_posts;
use crate::application::use_cases::post_matrix::{build_post_matrix, SourceFile};
use crate::application::use_cases::reference_fill::{
    fill_columns_from_reference, DEFAULT_FILLABLE_COLUMNS,
};
use crate::application::use_cases::table_builder::create_table_from_jsons;
use crate::application::use_cases::url_dedup::remove_url_duplicates;
use crate::application::use_cases::username_extractor::extract_instagram_usernames;
use crate::domain::error::AppError;
use crate::domain::keywords::CategoryKeywordMap;
use crate::domain::table::Table;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::io::csv_writer::table_to_csv;
use crate::infrastructure::storage::KeywordStore;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub classifier: Mutex<KeywordClassifier>,
    pub keyword_store: KeywordStore,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

fn error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::ValidationError(_) => HttpResponse::BadRequest().body(err.to_string()),
        AppError::NotFound(_) => HttpResponse::NotFound().body(err.to_string()),
        _ => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupRequest {
    pub table: Table,
    #[serde(default = "default_url_column")]
    pub url_column: String,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_true")]
    pub use_similarity: bool,
}

fn default_url_column() -> String {
    "URL".to_string()
}

fn default_similarity_threshold() -> f64 {
    0.9
}

fn default_true() -> bool {
    true
}

#[post("/dedup")]
async fn dedup(data: web::Data<HttpState>, req: web::Json<DedupRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Deduplicating {} rows (threshold={} similarity={})",
            req.table.len(),
            req.similarity_threshold,
            req.use_similarity
        ),
    );

    match remove_url_duplicates(
        &req.table,
        &req.url_column,
        req.similarity_threshold,
        req.use_similarity,
    ) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Deduplication failed: {}", e),
            );
            error_response(e)
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub table: Table,
    #[serde(default = "default_category_column")]
    pub category_column: String,
    /// Overrides the persisted map for this request only
    #[serde(default)]
    pub keyword_map: Option<CategoryKeywordMap>,
}

fn default_category_column() -> String {
    "Category".to_string()
}

#[post("/classify")]
async fn classify(data: web::Data<HttpState>, req: web::Json<ClassifyRequest>) -> impl Responder {
    let map = match &req.keyword_map {
        Some(map) => map.clone(),
        None => data.keyword_store.load(),
    };

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Classifying {} rows from column '{}'",
            req.table.len(),
            req.category_column
        ),
    );

    let mut classifier = data.classifier.lock().unwrap();
    let table = classifier.ensure_final_category_column(&req.table, &req.category_column, &map);
    HttpResponse::Ok().json(table)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceFillRequest {
    pub main_table: Table,
    pub reference_table: Table,
    #[serde(default)]
    pub fillable_columns: Option<Vec<String>>,
}

#[post("/reference-fill")]
async fn reference_fill(
    data: web::Data<HttpState>,
    req: web::Json<ReferenceFillRequest>,
) -> impl Responder {
    let fillable = req.fillable_columns.clone().unwrap_or_else(|| {
        DEFAULT_FILLABLE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect()
    });

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Reference fill: {} main rows, {} reference rows",
            req.main_table.len(),
            req.reference_table.len()
        ),
    );

    let outcome = fill_columns_from_reference(&req.main_table, &req.reference_table, &fillable);
    HttpResponse::Ok().json(outcome)
}

#[derive(Deserialize)]
pub struct FilesRequest {
    pub files: Vec<SourceFile>,
}

#[post("/post-matrix")]
async fn post_matrix(data: web::Data<HttpState>, req: web::Json<FilesRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Building post matrix from {} files", req.files.len()),
    );
    HttpResponse::Ok().json(build_post_matrix(&req.files))
}

#[derive(Deserialize)]
pub struct BrandMetricsRequest {
    pub table: Table,
    pub brands: Vec<String>,
}

#[post("/brand-metrics")]
async fn brand_metrics(
    data: web::Data<HttpState>,
    req: web::Json<BrandMetricsRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Generating metrics for {} brands over {} rows",
            req.brands.len(),
            req.table.len()
        ),
    );
    HttpResponse::Ok().json(create_data_points_summary(&req.table, &req.brands))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPostsRequest {
    pub reference_table: Table,
    pub final_table: Table,
}

#[post("/missing-posts")]
async fn missing_posts(
    data: web::Data<HttpState>,
    req: web::Json<MissingPostsRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Diffing {} reference rows against {} final rows",
            req.reference_table.len(),
            req.final_table.len()
        ),
    );
    HttpResponse::Ok().json(find_missing_posts(&req.reference_table, &req.final_table))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTableRequest {
    #[serde(default)]
    pub instagram_posts: Vec<Value>,
    #[serde(default)]
    pub followers_data: Vec<Value>,
    #[serde(default)]
    pub youtube_posts: Vec<Value>,
    #[serde(default)]
    pub tiktok_posts: Vec<Value>,
}

#[post("/build-table")]
async fn build_table(
    data: web::Data<HttpState>,
    req: web::Json<BuildTableRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Building unified table (ig={} yt={} tt={})",
            req.instagram_posts.len(),
            req.youtube_posts.len(),
            req.tiktok_posts.len()
        ),
    );
    HttpResponse::Ok().json(create_table_from_jsons(
        &req.instagram_posts,
        &req.followers_data,
        &req.youtube_posts,
        &req.tiktok_posts,
    ))
}

#[derive(Deserialize)]
pub struct UsernamesRequest {
    pub posts: Vec<Value>,
}

#[post("/usernames")]
async fn usernames(data: web::Data<HttpState>, req: web::Json<UsernamesRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Extracting usernames from {} posts", req.posts.len()),
    );
    HttpResponse::Ok().json(extract_instagram_usernames(&req.posts))
}

#[post("/cvi")]
async fn cvi(data: web::Data<HttpState>, req: web::Json<FilesRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Standardizing {} CVI files", req.files.len()),
    );
    HttpResponse::Ok().json(process_cvi_files(&req.files))
}

#[get("/keywords")]
async fn get_keywords(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.keyword_store.load())
}

#[put("/keywords")]
async fn put_keywords(
    data: web::Data<HttpState>,
    map: web::Json<CategoryKeywordMap>,
) -> impl Responder {
    match data.keyword_store.save(&map) {
        Ok(()) => {
            add_log(&data.logs, "INFO", "HttpApi", "Saved custom keyword map");
            HttpResponse::Ok().json(&*map)
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Failed to save keyword map: {}", e),
            );
            error_response(e)
        }
    }
}

#[delete("/keywords")]
async fn delete_keywords(data: web::Data<HttpState>) -> impl Responder {
    match data.keyword_store.reset() {
        Ok(()) => {
            add_log(&data.logs, "INFO", "HttpApi", "Reset keyword map to default");
            HttpResponse::Ok().json(data.keyword_store.load())
        }
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub table: Table,
}

#[post("/export/csv")]
async fn export_csv(data: web::Data<HttpState>, req: web::Json<ExportRequest>) -> impl Responder {
    match table_to_csv(&req.table) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv").body(csv),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("CSV export failed: {}", e),
            );
            error_response(e)
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(config: &AppConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        classifier: Mutex::new(KeywordClassifier::new()),
        keyword_store: KeywordStore::new(&config.data_dir),
        logs,
    });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(dedup)
                .service(classify)
                .service(reference_fill)
                .service(post_matrix)
                .service(brand_metrics)
                .service(missing_posts)
                .service(build_table)
                .service(usernames)
                .service(cvi)
                .service(get_keywords)
                .service(put_keywords)
                .service(delete_keywords)
                .service(export_csv)
                .service(get_logs),
        )
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
