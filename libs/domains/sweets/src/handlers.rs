use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SweetResult;
use crate::models::{
    CreateSweet, CreateSweetResponse, MessageResponse, PurchaseLineResult, PurchaseRequest,
    PurchaseResponse, RestockRequest, RestockResponse, SearchParams, SweetListResponse,
    SweetResponse, SweetView,
};
use crate::repository::SweetRepository;
use crate::service::SweetService;

/// OpenAPI documentation for the Sweets API
#[derive(OpenApi)]
#[openapi(
    paths(
        add_sweet,
        get_sweets,
        get_sweet,
        delete_sweet,
        search_sweets,
        purchase,
        restock,
    ),
    components(
        schemas(
            CreateSweet,
            SweetView,
            PurchaseRequest,
            RestockRequest,
            CreateSweetResponse,
            SweetListResponse,
            SweetResponse,
            MessageResponse,
            PurchaseResponse,
            RestockResponse,
            PurchaseLineResult,
        ),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Sweets", description = "Sweet shop inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the sweets router with all HTTP endpoints
///
/// `/addsweet` is the legacy alias existing clients still call; it shares
/// the handler with `/sweets`.
pub fn router<R: SweetRepository + 'static>(service: SweetService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/sweets", post(add_sweet))
        .route("/addsweet", post(add_sweet))
        .route("/getsweets", get(get_sweets))
        .route("/getsweet/{id}", get(get_sweet))
        .route("/deletesweet/{id}", delete(delete_sweet))
        .route("/searchsweets", get(search_sweets))
        .route("/purchase", post(purchase))
        .route("/restock", post(restock))
        .with_state(shared_service)
}

/// Add a new sweet to the inventory
#[utoipa::path(
    post,
    path = "/sweets",
    tag = "Sweets",
    request_body = CreateSweet,
    responses(
        (status = 201, description = "Sweet added successfully", body = CreateSweetResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_sweet<R: SweetRepository>(
    State(service): State<Arc<SweetService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSweet>,
) -> SweetResult<impl IntoResponse> {
    let sweet = service.create_sweet(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSweetResponse {
            status: true,
            sweet_id: sweet.id,
            message: "Sweet added successfully".to_string(),
        }),
    ))
}

/// List all sweets
#[utoipa::path(
    get,
    path = "/getsweets",
    tag = "Sweets",
    responses(
        (status = 200, description = "List of sweets", body = SweetListResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_sweets<R: SweetRepository>(
    State(service): State<Arc<SweetService<R>>>,
) -> SweetResult<Json<SweetListResponse>> {
    let sweets = service.list_sweets().await?;

    Ok(Json(SweetListResponse {
        status: true,
        sweets: sweets.into_iter().map(SweetView::from).collect(),
        message: "Sweets retrieved successfully".to_string(),
    }))
}

/// Get a sweet by ID
#[utoipa::path(
    get,
    path = "/getsweet/{id}",
    tag = "Sweets",
    params(
        ("id" = Uuid, Path, description = "Sweet ID")
    ),
    responses(
        (status = 200, description = "Sweet found", body = SweetResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_sweet<R: SweetRepository>(
    State(service): State<Arc<SweetService<R>>>,
    UuidPath(id): UuidPath,
) -> SweetResult<Json<SweetResponse>> {
    let sweet = service.get_sweet(id).await?;

    Ok(Json(SweetResponse {
        status: true,
        sweet: SweetView::from(sweet),
        message: "Sweet retrieved successfully".to_string(),
    }))
}

/// Delete a sweet by ID
#[utoipa::path(
    delete,
    path = "/deletesweet/{id}",
    tag = "Sweets",
    params(
        ("id" = Uuid, Path, description = "Sweet ID")
    ),
    responses(
        (status = 200, description = "Sweet deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_sweet<R: SweetRepository>(
    State(service): State<Arc<SweetService<R>>>,
    UuidPath(id): UuidPath,
) -> SweetResult<Json<MessageResponse>> {
    service.delete_sweet(id).await?;

    Ok(Json(MessageResponse {
        status: true,
        message: "Sweet deleted successfully".to_string(),
    }))
}

/// Search sweets by text or price
#[utoipa::path(
    get,
    path = "/searchsweets",
    tag = "Sweets",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching sweets", body = SweetListResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_sweets<R: SweetRepository>(
    State(service): State<Arc<SweetService<R>>>,
    Query(params): Query<SearchParams>,
) -> SweetResult<Json<SweetListResponse>> {
    let sweets = service
        .search_sweets(&params.query, params.sort_by.as_deref(), &params.order)
        .await?;

    Ok(Json(SweetListResponse {
        status: true,
        sweets: sweets.into_iter().map(SweetView::from).collect(),
        message: "Sweets retrieved successfully".to_string(),
    }))
}

/// Purchase one or more sweets
#[utoipa::path(
    post,
    path = "/purchase",
    tag = "Sweets",
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Purchase successful", body = PurchaseResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn purchase<R: SweetRepository>(
    State(service): State<Arc<SweetService<R>>>,
    ValidatedJson(request): ValidatedJson<PurchaseRequest>,
) -> SweetResult<Json<PurchaseResponse>> {
    let results = service.purchase_sweets(&request.items).await?;

    Ok(Json(PurchaseResponse {
        status: true,
        results,
        message: "Purchase successful".to_string(),
    }))
}

/// Restock a sweet
#[utoipa::path(
    post,
    path = "/restock",
    tag = "Sweets",
    request_body = RestockRequest,
    responses(
        (status = 200, description = "Restock successful", body = RestockResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn restock<R: SweetRepository>(
    State(service): State<Arc<SweetService<R>>>,
    ValidatedJson(request): ValidatedJson<RestockRequest>,
) -> SweetResult<Json<RestockResponse>> {
    let updated_stock = service.restock_sweet(request.sweet_id, request.quantity).await?;

    Ok(Json(RestockResponse {
        status: true,
        message: "Restock successful".to_string(),
        updated_stock,
    }))
}
