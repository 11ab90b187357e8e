//! # ルーター構築
//!
//! ルート定義とミドルウェア（Request ID・トレーシング）の組み立て。
//! `main` とテストの両方から同じ構成で呼び出す。

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use petclinic_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    ClinicState,
    add_pet,
    add_visit,
    create_owner,
    delete_owner,
    find_owners,
    get_owner,
    health_check,
    list_pet_types,
    list_vets,
    list_visits,
    update_owner,
    update_pet,
};

/// アプリケーションのルーターを構築する
///
/// レイヤーは下から順に適用される:
/// 1. `SetRequestIdLayer` が `x-request-id` を採番（クライアント指定があればそれを使う）
/// 2. `TraceLayer` が Request ID 付きのスパンを作成
/// 3. `PropagateRequestIdLayer` がレスポンスに `x-request-id` を付与
pub fn build_router(state: Arc<ClinicState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // 飼い主
        .route("/owners", get(find_owners).post(create_owner))
        .route("/owner/{owner_id}", get(get_owner).put(update_owner))
        .route("/owner/delete/{owner_id}", delete(delete_owner))
        // ペット
        .route("/pettypes", get(list_pet_types))
        .route("/owner/{owner_id}/pets", post(add_pet))
        .route("/owner/{owner_id}/pets/{pet_id}", put(update_pet))
        // 来院記録
        .route(
            "/owner/{owner_id}/pets/{pet_id}/visits",
            get(list_visits).post(add_visit),
        )
        // 獣医
        .route("/vets", get(list_vets))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
