/*
 * Responsibility
 * - middleware の公開インターフェース
 * - chain (interceptor の合成), auth (bearer 認証), cancel, http
 */
pub mod auth;
pub mod cancel;
pub mod chain;
pub mod http;
