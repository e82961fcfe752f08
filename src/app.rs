use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use ddragon_backend::{
    Build, Catalog, DDragonClient, DDragonConfig, DDragonError, Item, Rune, strip_markup,
};
use eframe::App;
use eframe::egui::{self, Align, Button, Color32, Frame, Layout, RichText, Spinner, Ui};
use log::{error, info};
use tokio_util::sync::CancellationToken;

// 应用常量
pub const APP_NAME: &str = "LoL Random Generator";
const CONFIG_KEY: &str = "ddragon_config";
const FRAME_MARGIN: f32 = 8.0;
const SECTION_SPACING: f32 = 6.0;
// 模拟“生成中”的延迟
const GENERATING_DELAY: Duration = Duration::from_millis(500);

struct Loaded {
    client: DDragonClient,
    catalog: Catalog,
}

enum LoadState {
    Loading,
    Ready(Arc<Loaded>),
    Failed(String),
}

/// 主应用程序状态
pub struct RandomizerApp {
    config: DDragonConfig,
    state: Arc<RwLock<LoadState>>,
    // 当前出装，每次生成整体替换
    build: Option<Build>,
    build_error: Option<String>,
    generating_until: Option<Instant>,
    // 数据加载完成后自动生成一次
    auto_generate: bool,
    rt: tokio::runtime::Runtime,
    cancel_token: CancellationToken,
}

/// 分区标题
macro_rules! section {
    ($ui:expr, $title:expr, $content:expr) => {
        Frame::group($ui.style())
            .inner_margin(FRAME_MARGIN)
            .show($ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.heading($title);
                ui.add_space(SECTION_SPACING);
                $content(ui);
            });
    };
}

impl App for RandomizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_generating(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| self.header(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.content(ui));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(&self.config) {
            Ok(config) => storage.set_string(CONFIG_KEY, config),
            Err(e) => error!("保存设置失败: {e}"),
        }
    }
}

impl RandomizerApp {
    pub fn new(cc: &eframe::CreationContext, rt: tokio::runtime::Runtime) -> Self {
        let config = cc
            .storage
            .and_then(|storage| storage.get_string(CONFIG_KEY))
            .and_then(|config| serde_json::from_str::<DDragonConfig>(&config).ok())
            .unwrap_or_default();

        let mut app = Self {
            config,
            state: Arc::new(RwLock::new(LoadState::Loading)),
            build: None,
            build_error: None,
            generating_until: None,
            auto_generate: true,
            rt,
            cancel_token: CancellationToken::new(),
        };
        app.reload(&cc.egui_ctx);
        app
    }

    fn loaded(&self) -> Option<Arc<Loaded>> {
        match &*self.state.read().unwrap() {
            LoadState::Ready(loaded) => Some(loaded.clone()),
            _ => None,
        }
    }

    /// 重新加载目录，丢弃尚未完成的加载任务
    fn reload(&mut self, ctx: &egui::Context) {
        self.cancel_token.cancel();
        self.cancel_token = CancellationToken::new();
        *self.state.write().unwrap() = LoadState::Loading;
        self.build = None;
        self.build_error = None;
        self.generating_until = None;
        self.auto_generate = true;

        let state = self.state.clone();
        let cancel_token = self.cancel_token.clone();
        let config = self.config.clone();
        let ctx = ctx.clone();
        self.rt.spawn(async move {
            let load = async move {
                let client = DDragonClient::new(config)?;
                let catalog = client.fetch_catalog().await?;
                Ok::<_, DDragonError>(Loaded { client, catalog })
            };
            let result = tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("已取消未完成的数据加载");
                    return;
                }
                result = load => result,
            };
            if publish_load(&state, &cancel_token, result) {
                ctx.request_repaint();
            }
        });
    }

    fn start_generating(&mut self, ctx: &egui::Context) {
        if self.generating_until.is_some() || self.loaded().is_none() {
            return;
        }
        self.generating_until = Some(Instant::now() + GENERATING_DELAY);
        ctx.request_repaint_after(GENERATING_DELAY);
    }

    fn poll_generating(&mut self, ctx: &egui::Context) {
        if self.auto_generate && self.loaded().is_some() {
            self.auto_generate = false;
            self.start_generating(ctx);
        }
        let Some(until) = self.generating_until else {
            return;
        };
        let now = Instant::now();
        if now < until {
            ctx.request_repaint_after(until - now);
            return;
        }
        self.generating_until = None;
        let Some(loaded) = self.loaded() else {
            return;
        };
        match loaded.catalog.random_build() {
            Ok(build) => {
                info!("生成出装: {}", build.champion.name);
                self.build = Some(build);
                self.build_error = None;
            }
            Err(e) => {
                error!("生成出装失败: {e}");
                self.build = None;
                self.build_error = Some(e.to_string());
            }
        }
    }

    /// 标题栏：生成按钮与数据设置
    fn header(&mut self, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        ui.add_space(FRAME_MARGIN);
        ui.horizontal(|ui| {
            ui.heading(APP_NAME);
            if let Some(loaded) = self.loaded() {
                ui.label(format!("Data Dragon {}", loaded.catalog.version()));
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let generating = self.generating_until.is_some();
                let text = if generating {
                    "Generating..."
                } else {
                    "Generate Random Build"
                };
                let enabled = !generating && self.loaded().is_some();
                if ui.add_enabled(enabled, Button::new(text)).clicked() {
                    self.start_generating(&ctx);
                }
                if ui.button("Reload data").clicked() {
                    self.reload(&ctx);
                }
                ui.text_edit_singleline(&mut self.config.locale);
                ui.label("Locale");
            });
        });
        ui.add_space(FRAME_MARGIN);
    }

    fn content(&mut self, ui: &mut Ui) {
        let (loaded, failure) = match &*self.state.read().unwrap() {
            LoadState::Loading => (None, None),
            LoadState::Ready(loaded) => (Some(loaded.clone()), None),
            LoadState::Failed(message) => (None, Some(message.clone())),
        };
        if let Some(message) = failure {
            let mut retry = false;
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.colored_label(Color32::LIGHT_RED, "Failed to load League of Legends data");
                ui.label(message);
                ui.add_space(SECTION_SPACING);
                retry = ui.button("Retry").clicked();
            });
            if retry {
                let ctx = ui.ctx().clone();
                self.reload(&ctx);
            }
            return;
        }
        let Some(loaded) = loaded else {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.add(Spinner::new().size(32.0));
                ui.label("Loading League of Legends data...");
            });
            return;
        };

        if let Some(message) = &self.build_error {
            ui.colored_label(Color32::LIGHT_RED, message.as_str());
        }
        if self.generating_until.is_some() {
            ui.horizontal(|ui| {
                ui.add(Spinner::new());
                ui.label("Generating...");
            });
        }
        let Some(build) = &self.build else {
            return;
        };

        let client = &loaded.client;
        let version = loaded.catalog.version();
        ui.columns(3, |columns| {
            section!(&mut columns[0], "Champion", |ui: &mut Ui| {
                render_champion(ui, client, version, build)
            });
            section!(&mut columns[1], "Items", |ui: &mut Ui| {
                for item in &build.legendary_items {
                    render_item(ui, client, version, item);
                }
                ui.separator();
                render_item(ui, client, version, &build.boots);
            });
            section!(&mut columns[2], "Runes", |ui: &mut Ui| {
                render_runes(ui, client, build)
            });
        });
    }
}

/// 写入加载结果；持有写锁后再检查取消，已被新的加载取代时丢弃结果
fn publish_load(
    state: &RwLock<LoadState>,
    cancel_token: &CancellationToken,
    result: Result<Loaded, DDragonError>,
) -> bool {
    let mut state = state.write().unwrap();
    if cancel_token.is_cancelled() {
        info!("数据加载已被取代，丢弃结果");
        return false;
    }
    *state = match result {
        Ok(loaded) => LoadState::Ready(Arc::new(loaded)),
        Err(e) => {
            error!("加载游戏数据失败: {e}");
            LoadState::Failed(e.to_string())
        }
    };
    true
}

fn render_champion(ui: &mut Ui, client: &DDragonClient, version: &str, build: &Build) {
    let champion = &build.champion;
    ui.label(RichText::new(&champion.name).size(24.0).strong());
    ui.label(champion.title.as_str());
    ui.label(champion.tags.join(" / "));
    ui.hyperlink_to(
        "Portrait",
        client.champion_image_url(version, &champion.image.full),
    );
}

fn render_item(ui: &mut Ui, client: &DDragonClient, version: &str, item: &Item) {
    ui.horizontal(|ui| {
        ui.hyperlink_to(item.name.as_str(), client.item_image_url(version, &item.image.full))
            .on_hover_text(strip_markup(&item.description));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(RichText::new(format!("{}g", item.gold.total)).color(Color32::GOLD));
        });
    });
}

fn render_runes(ui: &mut Ui, client: &DDragonClient, build: &Build) {
    ui.label(RichText::new(&build.primary_tree.name).strong());
    for (idx, rune) in build.primary_runes().iter().enumerate() {
        render_rune(ui, client, rune, idx == 0);
    }
    ui.add_space(SECTION_SPACING);
    ui.label(RichText::new(&build.secondary_tree.name).strong());
    for rune in build.secondary_runes() {
        render_rune(ui, client, rune, false);
    }
}

fn render_rune(ui: &mut Ui, client: &DDragonClient, rune: &Rune, keystone: bool) {
    let name = if keystone {
        RichText::new(&rune.name).size(18.0).color(Color32::GOLD)
    } else {
        RichText::new(&rune.name)
    };
    ui.hyperlink_to(name, client.rune_icon_url(&rune.icon));
    ui.label(RichText::new(strip_markup(&rune.short_desc)).small().weak());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Loaded {
        Loaded {
            client: DDragonClient::new(DDragonConfig::default()).unwrap(),
            catalog: Catalog::new("14.1.1", vec![], vec![], vec![], vec![]),
        }
    }

    #[test]
    fn superseded_load_is_discarded() {
        let state = RwLock::new(LoadState::Loading);
        let stale = CancellationToken::new();
        // 旧任务的 load 已完成，此时用户点击重新加载
        stale.cancel();

        assert!(!publish_load(&state, &stale, Ok(loaded())));
        assert!(matches!(*state.read().unwrap(), LoadState::Loading));

        let err = DDragonError::ResponseError("404 Not Found".to_string());
        assert!(!publish_load(&state, &stale, Err(err)));
        assert!(matches!(*state.read().unwrap(), LoadState::Loading));
    }

    #[test]
    fn current_load_is_published() {
        let state = RwLock::new(LoadState::Loading);
        let token = CancellationToken::new();

        assert!(publish_load(&state, &token, Ok(loaded())));
        match &*state.read().unwrap() {
            LoadState::Ready(loaded) => assert_eq!(loaded.catalog.version(), "14.1.1"),
            _ => panic!("load was not published"),
        }

        let err = DDragonError::ResponseError("500 Internal Server Error".to_string());
        assert!(publish_load(&state, &token, Err(err)));
        match &*state.read().unwrap() {
            LoadState::Failed(message) => assert!(message.contains("500")),
            _ => panic!("failure was not published"),
        }
    }
}
