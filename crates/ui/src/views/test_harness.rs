use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use lingua_core::model::ProfileId;
use services::{
    AppServices, Clock, DailyPlanService, GoalsService, ProfileService, RadarService,
    ResourceService, SettingsService, TrackerService,
};
use storage::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    DashboardView, GoalsView, PlanView, RadarView, ResourcesView, SettingsView, TrackerView,
};

struct TestApp {
    services: AppServices,
    clock: Clock,
}

impl UiApp for TestApp {
    fn active_profile(&self) -> ProfileId {
        self.services.active_profile().clone()
    }

    fn show_plan_on_launch(&self) -> bool {
        false
    }

    fn clock(&self) -> Clock {
        self.clock
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn tracker(&self) -> Arc<TrackerService> {
        self.services.tracker()
    }

    fn goals(&self) -> Arc<GoalsService> {
        self.services.goals()
    }

    fn resources(&self) -> Arc<ResourceService> {
        self.services.resources()
    }

    fn radar(&self) -> Arc<RadarService> {
        self.services.radar()
    }

    fn daily_plan(&self) -> Arc<DailyPlanService> {
        self.services.daily_plan()
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Tracker,
    Goals,
    Resources,
    Radar,
    Plan,
    Settings,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = build_app_context(&app);
    use_context_provider(|| Signal::new(ctx.initial_profile().clone()));
    use_context_provider(|| Signal::new(lingua_core::model::Settings::default()));
    use_context_provider(|| ctx);
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Tracker => rsx! { TrackerView {} },
        ViewKind::Goals => rsx! { GoalsView {} },
        ViewKind::Resources => rsx! { ResourcesView {} },
        ViewKind::Radar => rsx! { RadarView {} },
        ViewKind::Plan => rsx! { PlanView {} },
        ViewKind::Settings => rsx! { SettingsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub profile: ProfileId,
    pub clock: Clock,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, clock: Clock) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::new(&storage, clock).expect("bootstrap services");
    let profile = services.active_profile().clone();

    let app = Arc::new(TestApp {
        services: services.clone(),
        clock,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        services,
        profile,
        clock,
    }
}
