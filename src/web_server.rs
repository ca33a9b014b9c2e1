use std::collections::BTreeMap;

use actix_web::{
    get,
    http::{header::ContentType, Method},
    web, App, Either, HttpResponse, HttpServer, Responder, Result,
};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::NodeError;
use crate::node::schema::{NodeParams, NodeSchema, NODE_NAME};
use crate::node::svg_preview::{NodeOutput, SvgPreview};
use crate::utils::svg_to_png::ResvgBackend;

#[derive(Serialize, Debug)]
struct ExecuteResponse {
    outputs: Vec<NodeOutput>,
}

#[derive(Serialize, Debug)]
struct Message {
    error: String,
}

#[get("/object_info")]
async fn object_info() -> impl Responder {
    let mut nodes = BTreeMap::new();
    nodes.insert(NODE_NAME, SvgPreview::<ResvgBackend>::schema());
    HttpResponse::Ok().json(nodes)
}

#[get("/object_info/{node}")]
async fn object_info_node(node: web::Path<String>) -> HttpResponse {
    if node.as_str() == NODE_NAME {
        HttpResponse::Ok().json(NodeSchema::svg_preview())
    } else {
        HttpResponse::NotFound().json(Message {
            error: format!("unknown node `{}`", node),
        })
    }
}

async fn execute(node: web::Data<SvgPreview>, params: web::Json<NodeParams>) -> Result<HttpResponse> {
    log::info!(
        "execute {} ({}x{}, transparency: {})",
        NODE_NAME,
        params.width,
        params.height,
        params.transparency
    );
    let output = web::block(move || node.execute(&params)).await?.map_err(log_failure)?;
    Ok(HttpResponse::Ok().json(ExecuteResponse { outputs: vec![output] }))
}

async fn preview(node: web::Data<SvgPreview>, params: web::Json<NodeParams>) -> Result<HttpResponse> {
    let png = web::block(move || node.preview_png(&params)).await?.map_err(log_failure)?;
    Ok(HttpResponse::Ok().content_type(ContentType(mime::IMAGE_PNG)).body(png))
}

fn log_failure(err: NodeError) -> NodeError {
    log::error!("{} failed: {}", NODE_NAME, err);
    err
}

async fn default_handler(req_method: Method) -> Result<impl Responder> {
    match req_method {
        Method::GET => Ok(Either::Left(HttpResponse::NotFound().json(Message {
            error: "not found".to_string(),
        }))),
        _ => Ok(Either::Right(HttpResponse::MethodNotAllowed().finish())),
    }
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(object_info)
        .service(object_info_node)
        .service(
            web::resource("/api/nodes/SVGPreview/execute")
                .route(web::post().to(execute))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/nodes/SVGPreview/preview")
                .route(web::post().to(preview))
                .default_service(web::to(method_not_allowed)),
        )
        .default_service(web::to(default_handler));
}

pub async fn start(config: ServerConfig) -> std::io::Result<()> {
    let node = web::Data::new(SvgPreview::new(ResvgBackend::from_config(&config)));

    log::info!("serving {} on {}:{}", NODE_NAME, config.host, config.port);
    HttpServer::new(move || App::new().app_data(node.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
