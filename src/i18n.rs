//! User-visible text for the dashboard.
//!
//! Every string a user can read comes from a [`Messages`] catalog selected
//! by [`Locale`]. Turkish is the language of the original deployment;
//! English is the default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Endpoint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Tr => &TR,
        }
    }

    /// `chrono` format string used for timestamps (always rendered in UTC).
    pub fn date_format(self) -> &'static str {
        match self {
            Self::En => "%-m/%-d/%Y, %-I:%M:%S %p",
            Self::Tr => "%d.%m.%Y %H:%M:%S",
        }
    }

    /// Thousands separator for counters.
    pub fn group_separator(self) -> char {
        match self {
            Self::En => ',',
            Self::Tr => '.',
        }
    }

    /// `lang` attribute for the rendered document.
    pub fn html_lang(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Self::En),
            "tr" | "tr-tr" | "turkish" => Some(Self::Tr),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.html_lang())
    }
}

/// A complete message catalog.
#[derive(Debug)]
pub struct Messages {
    pub app_title: &'static str,

    // Tabs
    pub tab_api_keys: &'static str,
    pub tab_ip_usage: &'static str,
    pub tab_usage_summary: &'static str,
    pub tab_endpoints: &'static str,
    pub tab_playground: &'static str,

    // Panel states
    pub loading: &'static str,
    pub keys_empty: &'static str,
    pub ips_empty: &'static str,
    pub keys_load_failed: &'static str,
    pub ips_load_failed: &'static str,
    pub summary_load_failed: &'static str,

    // Key table / details
    pub col_id: &'static str,
    pub col_api_key: &'static str,
    pub col_description: &'static str,
    pub col_unlimited: &'static str,
    pub col_monthly_limit: &'static str,
    pub col_tokens_used: &'static str,
    pub col_auto_reset: &'static str,
    pub col_last_reset: &'static str,
    pub col_created: &'static str,
    pub col_updated: &'static str,
    pub col_actions: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub action_details: &'static str,
    pub action_edit: &'static str,
    pub action_delete: &'static str,
    pub action_copy: &'static str,
    pub new_key: &'static str,
    pub refresh: &'static str,

    // IP table
    pub col_ip_address: &'static str,
    pub col_token_limit: &'static str,
    pub col_request_count: &'static str,
    pub col_last_request: &'static str,
    pub action_reset: &'static str,

    // Summary
    pub general_stats: &'static str,
    pub total_api_keys: &'static str,
    pub total_ips: &'static str,
    pub today_requests: &'static str,
    pub monthly_requests: &'static str,
    pub top_api_keys: &'static str,
    pub top_ips: &'static str,
    pub api_key_id: &'static str,
    pub requests_suffix: &'static str,

    // Modals and dialog
    pub modal_create_title: &'static str,
    pub modal_edit_title: &'static str,
    pub modal_create_button: &'static str,
    pub modal_update_button: &'static str,
    pub details_title: &'static str,
    pub close: &'static str,
    pub cancel: &'static str,
    pub confirm: &'static str,
    pub form_description: &'static str,
    pub form_monthly_limit: &'static str,
    pub form_unlimited: &'static str,
    pub form_auto_reset: &'static str,
    pub delete_title: &'static str,
    pub reset_title: &'static str,

    // Toasts
    pub error_prefix: &'static str,
    pub key_created: &'static str,
    pub key_updated: &'static str,
    pub key_deleted: &'static str,
    pub ip_reset: &'static str,
    pub key_copied: &'static str,
    pub key_create_failed: &'static str,
    pub key_update_failed: &'static str,
    pub key_delete_failed: &'static str,
    pub ip_reset_failed: &'static str,
    pub key_fetch_failed: &'static str,

    // Playground
    pub status_label: &'static str,
    pub health_running: &'static str,
    pub health_error: &'static str,
    pub health_unreachable: &'static str,
    pub health_check: &'static str,
    pub predict_placeholder: &'static str,
    pub predict_button: &'static str,
    pub predict_empty: &'static str,

    // Endpoints reference
    pub endpoints_intro: &'static str,

    // Command line
    pub cancelled: &'static str,
    pub usage_title_key: &'static str,
    pub usage_title_ip: &'static str,
    pub usage_limit: &'static str,
    pub usage_unlimited: &'static str,
    pub usage_remaining: &'static str,
    pub usage_rate_limit: &'static str,
    pub minutes_suffix: &'static str,
}

impl Messages {
    /// `"Error: <detail>"` in the active language.
    pub fn error(&self, detail: &str) -> String {
        format!("{}: {}", self.error_prefix, detail)
    }

    pub fn delete_prompt(&self, id: i64) -> String {
        if std::ptr::eq(self, &TR) {
            format!("{id} ID'li API anahtarını silmek istediğinizden emin misiniz?")
        } else {
            format!("Are you sure you want to delete API key #{id}?")
        }
    }

    pub fn reset_prompt(&self, ip: &str) -> String {
        if std::ptr::eq(self, &TR) {
            format!(
                "{ip} IP adresinin kullanım limitlerini \
                 sıfırlamak istediğinizden emin misiniz?"
            )
        } else {
            format!("Are you sure you want to reset the usage limits of {ip}?")
        }
    }

    /// One-line description for the endpoint reference tab.
    pub fn endpoint_description(&self, endpoint: Endpoint<'_>) -> &'static str {
        let tr = std::ptr::eq(self, &TR);
        match (endpoint, tr) {
            (Endpoint::ListKeys, false) => "List all API keys",
            (Endpoint::ListKeys, true) => "Tüm API anahtarlarını listeler",
            (Endpoint::GetKey(_), false) => "Fetch one API key",
            (Endpoint::GetKey(_), true) => "Tek bir API anahtarını getirir",
            (Endpoint::CreateKey, false) => "Create a new API key",
            (Endpoint::CreateKey, true) => "Yeni API anahtarı oluşturur",
            (Endpoint::UpdateKey(_), false) => "Update an API key",
            (Endpoint::UpdateKey(_), true) => "API anahtarını günceller",
            (Endpoint::DeleteKey(_), false) => "Delete an API key",
            (Endpoint::DeleteKey(_), true) => "API anahtarını siler",
            (Endpoint::ListIpUsage, false) => "Per-IP usage and limits",
            (Endpoint::ListIpUsage, true) => "IP bazlı kullanım ve limitler",
            (Endpoint::ResetIpLimits(_), false) => "Reset the counters of one IP",
            (Endpoint::ResetIpLimits(_), true) => "Bir IP adresinin sayaçlarını sıfırlar",
            (Endpoint::UsageSummary, false) => "Aggregate usage statistics",
            (Endpoint::UsageSummary, true) => "Genel kullanım istatistikleri",
            (Endpoint::UsageInfo, false) => "Quota of the calling key or IP",
            (Endpoint::UsageInfo, true) => "Çağıran anahtar veya IP için kota bilgisi",
            (Endpoint::Health, false) => "Service health check",
            (Endpoint::Health, true) => "Servis sağlık kontrolü",
            (Endpoint::Predict, false) => "Analyze a text",
            (Endpoint::Predict, true) => "Metin analizi yapar",
        }
    }

    /// Success text for a create that returned the generated key.
    pub fn key_created_with(&self, key: &str) -> String {
        format!("{} {}", self.key_created, key)
    }
}

pub static EN: Messages = Messages {
    app_title: "API Key Administration",

    tab_api_keys: "API Keys",
    tab_ip_usage: "IP Usage",
    tab_usage_summary: "Usage Summary",
    tab_endpoints: "Endpoints",
    tab_playground: "Playground",

    loading: "Loading...",
    keys_empty: "No API keys have been created yet.",
    ips_empty: "No IP usage has been recorded yet.",
    keys_load_failed: "An error occurred while loading API keys.",
    ips_load_failed: "An error occurred while loading IP usage.",
    summary_load_failed: "An error occurred while loading the usage summary.",

    col_id: "ID",
    col_api_key: "API Key",
    col_description: "Description",
    col_unlimited: "Unlimited",
    col_monthly_limit: "Monthly Limit",
    col_tokens_used: "Used",
    col_auto_reset: "Auto Reset",
    col_last_reset: "Last Reset",
    col_created: "Created",
    col_updated: "Last Updated",
    col_actions: "Actions",
    yes: "Yes",
    no: "No",
    action_details: "Details",
    action_edit: "Edit",
    action_delete: "Delete",
    action_copy: "Copy",
    new_key: "New API Key",
    refresh: "Refresh",

    col_ip_address: "IP Address",
    col_token_limit: "Token Limit",
    col_request_count: "Requests",
    col_last_request: "Last Request",
    action_reset: "Reset",

    general_stats: "General Statistics",
    total_api_keys: "Total API Keys",
    total_ips: "Total IP Addresses",
    today_requests: "Requests Today",
    monthly_requests: "Requests in the Last 30 Days",
    top_api_keys: "Most Used API Keys",
    top_ips: "Most Active IP Addresses",
    api_key_id: "API Key ID",
    requests_suffix: "requests",

    modal_create_title: "Create API Key",
    modal_edit_title: "Edit API Key",
    modal_create_button: "Create",
    modal_update_button: "Update",
    details_title: "API Key Details",
    close: "Close",
    cancel: "Cancel",
    confirm: "Confirm",
    form_description: "Description",
    form_monthly_limit: "Monthly Token Limit",
    form_unlimited: "Unlimited",
    form_auto_reset: "Reset usage monthly",
    delete_title: "Delete API Key",
    reset_title: "Reset IP Limits",

    error_prefix: "Error",
    key_created: "API key created successfully.",
    key_updated: "API key updated successfully.",
    key_deleted: "API key deleted successfully.",
    ip_reset: "IP limits reset successfully.",
    key_copied: "API key copied to clipboard.",
    key_create_failed: "An error occurred while creating the API key.",
    key_update_failed: "An error occurred while updating the API key.",
    key_delete_failed: "An error occurred while deleting the API key.",
    ip_reset_failed: "An error occurred while resetting IP limits.",
    key_fetch_failed: "An error occurred while fetching API key details.",

    status_label: "API status",
    health_running: "Running",
    health_error: "Error",
    health_unreachable: "Connection error",
    health_check: "Check again",
    predict_placeholder: "Enter text to analyze",
    predict_button: "Test",
    predict_empty: "Please enter some text.",

    endpoints_intro: "Endpoints exposed by the backend service.",

    cancelled: "Cancelled.",
    usage_title_key: "Usage for API key",
    usage_title_ip: "Usage for IP address",
    usage_limit: "Limit",
    usage_unlimited: "unlimited",
    usage_remaining: "Remaining",
    usage_rate_limit: "Rate limit",
    minutes_suffix: "min",
};

pub static TR: Messages = Messages {
    app_title: "API Anahtar Yönetimi",

    tab_api_keys: "API Anahtarları",
    tab_ip_usage: "IP Kullanımı",
    tab_usage_summary: "Kullanım Özeti",
    tab_endpoints: "Endpointler",
    tab_playground: "Test Alanı",

    loading: "Yükleniyor...",
    keys_empty: "Henüz hiç API anahtarı oluşturulmamış.",
    ips_empty: "Henüz IP kullanım bilgisi bulunmuyor.",
    keys_load_failed: "API anahtarları yüklenirken bir hata oluştu.",
    ips_load_failed: "IP kullanım bilgileri yüklenirken bir hata oluştu.",
    summary_load_failed: "Kullanım özeti yüklenirken bir hata oluştu.",

    col_id: "ID",
    col_api_key: "API Anahtarı",
    col_description: "Açıklama",
    col_unlimited: "Sınırsız",
    col_monthly_limit: "Aylık Limit",
    col_tokens_used: "Kullanılan",
    col_auto_reset: "Otomatik Reset",
    col_last_reset: "Son Reset",
    col_created: "Oluşturulma",
    col_updated: "Son Güncelleme",
    col_actions: "İşlemler",
    yes: "Evet",
    no: "Hayır",
    action_details: "Detay",
    action_edit: "Düzenle",
    action_delete: "Sil",
    action_copy: "Kopyala",
    new_key: "Yeni API Anahtarı",
    refresh: "Yenile",

    col_ip_address: "IP Adresi",
    col_token_limit: "Token Limiti",
    col_request_count: "İstek Sayısı",
    col_last_request: "Son İstek",
    action_reset: "Sıfırla",

    general_stats: "Genel İstatistikler",
    total_api_keys: "Toplam API Anahtarı",
    total_ips: "Toplam IP Adresi",
    today_requests: "Bugünkü İstek Sayısı",
    monthly_requests: "Son 30 Gündeki İstek Sayısı",
    top_api_keys: "En Çok Kullanılan API Anahtarları",
    top_ips: "En Çok Kullanılan IP Adresleri",
    api_key_id: "API Key ID",
    requests_suffix: "istek",

    modal_create_title: "Yeni API Anahtarı Oluştur",
    modal_edit_title: "API Anahtarı Düzenle",
    modal_create_button: "Oluştur",
    modal_update_button: "Güncelle",
    details_title: "API Anahtarı Detayları",
    close: "Kapat",
    cancel: "İptal",
    confirm: "Onayla",
    form_description: "Açıklama",
    form_monthly_limit: "Aylık Token Limiti",
    form_unlimited: "Sınırsız",
    form_auto_reset: "Aylık otomatik sıfırlama",
    delete_title: "API Anahtarını Sil",
    reset_title: "IP Limitlerini Sıfırla",

    error_prefix: "Hata",
    key_created: "API anahtarı başarıyla oluşturuldu.",
    key_updated: "API anahtarı başarıyla güncellendi.",
    key_deleted: "API anahtarı başarıyla silindi.",
    ip_reset: "IP limitleri başarıyla sıfırlandı.",
    key_copied: "API anahtarı panoya kopyalandı!",
    key_create_failed: "API anahtarı oluşturulurken bir hata oluştu.",
    key_update_failed: "API anahtarı güncellenirken bir hata oluştu.",
    key_delete_failed: "API anahtarı silinirken bir hata oluştu.",
    ip_reset_failed: "IP limitleri sıfırlanırken bir hata oluştu.",
    key_fetch_failed: "API anahtarı bilgileri alınırken bir hata oluştu.",

    status_label: "API durumu",
    health_running: "Çalışıyor",
    health_error: "Hata",
    health_unreachable: "Bağlantı Hatası",
    health_check: "Tekrar kontrol et",
    predict_placeholder: "Analiz edilecek metni girin",
    predict_button: "Test Et",
    predict_empty: "Lütfen bir metin girin",

    endpoints_intro: "Servisin sunduğu endpointler.",

    cancelled: "İptal edildi.",
    usage_title_key: "API anahtarı kullanımı",
    usage_title_ip: "IP adresi kullanımı",
    usage_limit: "Limit",
    usage_unlimited: "sınırsız",
    usage_remaining: "Kalan",
    usage_rate_limit: "Hız limiti",
    minutes_suffix: "dk",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_locale_variants() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("tr-TR"), Some(Locale::Tr));
        assert_eq!(Locale::parse("de"), None);
    }

    #[test]
    fn prompts_follow_catalog() {
        assert!(EN.delete_prompt(7).contains("#7"));
        assert!(TR.delete_prompt(7).starts_with("7 ID'li"));
        assert!(TR.reset_prompt("1.2.3.4").starts_with("1.2.3.4 IP"));
        assert_eq!(TR.error("yok"), "Hata: yok");
    }
}
