//! UI text tables (EN/ZH).

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn texts(self) -> &'static Translation {
        match self {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}

pub struct Translation {
    // Chrome
    pub app_title: &'static str, pub select_template: &'static str, pub current_template: &'static str,
    pub svg_editor: &'static str, pub edit_placeholder: &'static str, pub live_preview: &'static str,
    pub ready: &'static str, pub loading: &'static str,

    // Toolbar & editor actions
    pub apply_changes: &'static str, pub reset_template: &'static str, pub refresh_preview: &'static str,
    pub export_svg: &'static str, pub export_png: &'static str, pub save_template: &'static str,
    pub my_templates: &'static str, pub api_docs: &'static str, pub settings: &'static str,

    // Settings panel
    pub api_endpoint: &'static str, pub api_endpoint_hint: &'static str, pub refresh_interval: &'static str,
    pub auto_refresh: &'static str, pub show_grid: &'static str, pub save_settings: &'static str,
    pub reset_settings: &'static str,

    // Template browser & save prompt
    pub template_name_prompt: &'static str, pub name_column: &'static str, pub size_column: &'static str,
    pub load_template: &'static str, pub no_custom_templates: &'static str,
    pub save: &'static str, pub cancel: &'static str, pub close: &'static str,

    // Status messages
    pub loading_templates: &'static str, pub templates_loaded: &'static str, pub editor_loaded: &'static str,
    pub preview_updated: &'static str, pub preview_failed: &'static str, pub svg_applied: &'static str,
    pub template_applied: &'static str, pub template_reset: &'static str, pub svg_exported: &'static str,
    pub png_exported: &'static str, pub template_saved: &'static str, pub settings_saved: &'static str,
    pub settings_reset: &'static str, pub nothing_to_export: &'static str, pub export_failed: &'static str,
    pub error_loading_templates: &'static str, pub error_loading_content: &'static str,
    pub offline_list: &'static str, pub open_failed: &'static str,
}

pub const EN: Translation = Translation {
    app_title: "🎵 Now Playing Template Editor",
    select_template: "Template", current_template: "Current template",
    svg_editor: "SVG Editor", edit_placeholder: "Edit SVG code here...",
    live_preview: "Live Preview", ready: "Ready", loading: "Loading...",
    apply_changes: "Apply Changes", reset_template: "Reset Template", refresh_preview: "Refresh Preview",
    export_svg: "Export SVG", export_png: "Export PNG", save_template: "Save Template",
    my_templates: "My Templates", api_docs: "API Docs", settings: "Settings",
    api_endpoint: "API Endpoint", api_endpoint_hint: "Enter API endpoint URL",
    refresh_interval: "Refresh Interval (seconds)", auto_refresh: "Auto refresh preview",
    show_grid: "Show grid", save_settings: "Save Settings", reset_settings: "Reset Settings",
    template_name_prompt: "Enter template name:", name_column: "Name", size_column: "Size",
    load_template: "Load", no_custom_templates: "No saved templates yet",
    save: "Save", cancel: "Cancel", close: "Close",
    loading_templates: "Loading templates...", templates_loaded: "templates loaded",
    editor_loaded: "Editor loaded", preview_updated: "Preview updated",
    preview_failed: "Failed to update preview", svg_applied: "Custom SVG applied",
    template_applied: "Template applied", template_reset: "Template reset",
    svg_exported: "SVG exported", png_exported: "PNG exported", template_saved: "Template saved",
    settings_saved: "Settings saved", settings_reset: "Settings reset",
    nothing_to_export: "Nothing to export yet", export_failed: "Export failed",
    error_loading_templates: "Failed to load templates, using default templates",
    error_loading_content: "Failed to load template content",
    offline_list: "Offline template list", open_failed: "Could not open browser",
};

pub const ZH: Translation = Translation {
    app_title: "🎵 Now Playing 模板编辑器",
    select_template: "模板", current_template: "当前模板",
    svg_editor: "SVG编辑器", edit_placeholder: "在这里编辑SVG代码...",
    live_preview: "实时预览", ready: "就绪", loading: "加载中...",
    apply_changes: "应用更改", reset_template: "重置模板", refresh_preview: "刷新预览",
    export_svg: "导出SVG", export_png: "导出PNG", save_template: "保存模板",
    my_templates: "我的模板", api_docs: "API文档", settings: "设置",
    api_endpoint: "API端点", api_endpoint_hint: "输入API端点URL",
    refresh_interval: "刷新间隔(秒)", auto_refresh: "自动刷新预览",
    show_grid: "显示网格", save_settings: "保存设置", reset_settings: "重置设置",
    template_name_prompt: "输入模板名称:", name_column: "名称", size_column: "大小",
    load_template: "加载", no_custom_templates: "还没有保存的模板",
    save: "保存", cancel: "取消", close: "关闭",
    loading_templates: "正在加载模板...", templates_loaded: "个模板已加载",
    editor_loaded: "编辑器已加载", preview_updated: "预览已更新",
    preview_failed: "预览更新失败", svg_applied: "自定义SVG已应用",
    template_applied: "模板已应用", template_reset: "模板已重置",
    svg_exported: "SVG已导出", png_exported: "PNG已导出", template_saved: "模板已保存",
    settings_saved: "设置已保存", settings_reset: "设置已重置",
    nothing_to_export: "还没有可导出的内容", export_failed: "导出失败",
    error_loading_templates: "加载模板时出错, 使用默认模板",
    error_loading_content: "加载模板内容失败",
    offline_list: "离线模板列表", open_failed: "无法打开浏览器",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serializes_as_short_code() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::to_string(&Language::Zh).unwrap(), "\"zh\"");
        let lang: Language = serde_json::from_str("\"zh\"").unwrap();
        assert_eq!(lang, Language::Zh);
    }

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(Language::default(), Language::En);
        assert_eq!(Language::default().texts().ready, "Ready");
    }
}
