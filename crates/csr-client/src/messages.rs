//! User-visible texts. The registry UI is Japanese; fallbacks are used
//! whenever the backend gives no structured `error.message`.

pub const INVALID_INPUT: &str = "入力値が不正です";

pub const REGISTER_BUSY: &str = "登録中...";
pub const REGISTER_CONFLICT: &str = "同じ name/version は登録済みです";
pub const REGISTER_FAILED: &str = "登録処理に失敗しました";

pub const VERIFY_BUSY: &str = "検証中...";
pub const VERIFY_NOT_FOUND: &str = "一致する登録が見つかりません";
pub const VERIFY_FAILED: &str = "検証処理に失敗しました";

pub const LIST_BUSY: &str = "読み込み中...";
pub const LIST_FAILED: &str = "一覧取得に失敗しました";

pub const LEDGER_BUSY: &str = "台帳検証中...";
pub const LEDGER_RUNNING: &str = "台帳検証を実行中です...";
pub const SIGNATURE_RUNNING: &str = "署名検証を実行中です...";
pub const LEDGER_OK: &str = "台帳検証成功: すべてのブロック整合性が有効です";
pub const LEDGER_FAILED: &str = "台帳検証に失敗しました";
pub const SIGNATURE_OK: &str = "署名検証成功: 最新ブロックの署名は有効です";
pub const SIGNATURE_NG: &str = "署名検証失敗: 署名が無効です";
pub const SIGNATURE_FAILED: &str = "署名検証に失敗しました";

pub const ANCHOR_BUSY: &str = "取得中...";
pub const ANCHOR_FAILED: &str = "アンカー取得に失敗しました";
pub const ANCHOR_FETCH_FIRST: &str = "先にアンカーを取得してください";
pub const COPY_HASH_OK: &str = "block_hash をコピーしました";
pub const COPY_SIGNATURE_OK: &str = "signature をコピーしました";
pub const COPY_FAILED: &str = "クリップボードへのコピーに失敗しました";

pub const KEY_BUSY: &str = "取得中...";
pub const KEY_FAILED: &str = "公開鍵の取得に失敗しました";

pub const HEALTH_ONLINE: &str = "API: online";
pub const HEALTH_OFFLINE: &str = "API: offline";

/// Placeholder for a field the backend omitted.
pub const MISSING: &str = "-";

pub fn registered(name: &str, version: &str, sha256: &str, index: u64) -> String {
    format!("登録完了: {name} {version} / sha256={sha256} / index={index}")
}

pub fn verified(name: &str, version: &str, sha256: &str, match_mode: &str) -> String {
    format!(
        "検証成功: 登録情報と一致しました（name={name}, version={version}, sha256={sha256}, match_mode={match_mode}）"
    )
}

pub fn record_count(count: u64) -> String {
    format!("件数: {count}")
}

pub fn ledger_broken(index: Option<u64>, reason: Option<&str>) -> String {
    let index = index.map(|i| i.to_string());
    format!(
        "台帳検証失敗: index={} のブロックが不正です（reason={}）",
        index.as_deref().unwrap_or(MISSING),
        reason.unwrap_or(MISSING)
    )
}

pub fn anchor_fetched(latest_index: u64, block_hash: &str) -> String {
    format!("アンカー取得完了: latest_index={latest_index}, block_hash={block_hash}")
}

pub fn public_key(key_id: &str) -> String {
    format!("公開鍵: key_id={key_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_contains_all_fields() {
        let m = registered("svc", "1.0", "abc", 3);
        for part in ["svc", "1.0", "abc", "3"] {
            assert!(m.contains(part), "{m} lacks {part}");
        }
    }

    #[test]
    fn ledger_broken_placeholders() {
        let m = ledger_broken(Some(2), Some("hash_mismatch"));
        assert!(m.contains("index=2"));
        assert!(m.contains("reason=hash_mismatch"));
        let m = ledger_broken(None, None);
        assert!(m.contains("index=-"));
        assert!(!m.contains("None"));
    }

    #[test]
    fn count_text() {
        assert_eq!(record_count(0), "件数: 0");
    }
}
