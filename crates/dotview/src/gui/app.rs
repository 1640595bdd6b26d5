use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::dots::{self, DotRegistry};
use crate::gui::theme::{self, ThemeColors};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use pagedots::{PageIndicator, SetOutcome, Size};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub struct AppInit {
    pub config: Config,
    /// Initial page count, which may differ from `config.pages`.
    pub pages: usize,
    pub selected: usize,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub indicator: Rc<RefCell<PageIndicator>>,
    pub drawing_area: gtk::DrawingArea,
    pub registry: DotRegistry,
    /// Last configuration read from disk.
    pub config: Config,
}

#[derive(Debug)]
pub enum AppMsg {
    Next,
    Previous,
    First,
    Last,
    AddPage,
    RemovePage,
    Resize(i32, i32),
    /// Press on the left half steps back, the right half steps forward.
    Click(f64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn message_for_key(key: gdk::Key) -> Option<AppMsg> {
    let bindings = [
        (gdk::Key::Right, AppMsg::Next),
        (gdk::Key::l, AppMsg::Next),
        (gdk::Key::Left, AppMsg::Previous),
        (gdk::Key::h, AppMsg::Previous),
        (gdk::Key::Home, AppMsg::First),
        (gdk::Key::End, AppMsg::Last),
        (gdk::Key::plus, AppMsg::AddPage),
        (gdk::Key::equal, AppMsg::AddPage),
        (gdk::Key::minus, AppMsg::RemovePage),
    ];
    bindings
        .into_iter()
        .find_map(|(bound, msg)| (bound == key).then_some(msg))
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("dotview"),
            set_default_size: (480, 120),
            add_css_class: "dotview-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match message_for_key(key) {
                        Some(msg) => {
                            sender.input(msg);
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, _| {
                        sender.input(AppMsg::Click(x));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            pages,
            selected,
            events,
        } = init;

        theme::load_css();

        let registry = DotRegistry::new();
        let mut indicator = PageIndicator::new(&config.indicator)
            .with_provider(registry.provider())
            .with_animator(Box::new(registry.animator()));
        indicator.set_page_count(pages);
        indicator.set_selected_page(selected);
        log::info!(
            "Showing {} pages, window of {} dots",
            indicator.page_count(),
            indicator.max_visible_dots()
        );

        let model = AppModel {
            indicator: Rc::new(RefCell::new(indicator)),
            drawing_area: gtk::DrawingArea::default(),
            registry: registry.clone(),
            config,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.sync_content_size();
        model.sync_band();

        let registry_draw = registry.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = dots::draw(cr, &registry_draw, colors.band) {
                    log::error!("Drawing error: {}", e);
                }
            });

        widgets.drawing_area.add_tick_callback(move |drawing_area, _| {
            if registry.any_animating(Instant::now()) {
                drawing_area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let outcome = {
            let mut indicator = self.indicator.borrow_mut();
            match msg {
                AppMsg::Next => indicator.select_next(),
                AppMsg::Previous => indicator.select_previous(),
                AppMsg::First => indicator.set_selected_page(0),
                AppMsg::Last => indicator.set_selected_page(usize::MAX),
                AppMsg::AddPage => {
                    let count = indicator.page_count();
                    indicator.set_page_count(count.saturating_add(1))
                }
                AppMsg::RemovePage => {
                    let count = indicator.page_count();
                    indicator.set_page_count(count.saturating_sub(1))
                }
                AppMsg::Click(x) if x < indicator.bounds().width / 2.0 => {
                    indicator.select_previous()
                }
                AppMsg::Click(_) => indicator.select_next(),
                AppMsg::Resize(width, height) => {
                    indicator.set_bounds(Size::new(width as f64, height as f64))
                }
                AppMsg::ConfigReload => match config::load_config() {
                    Ok(new_config) => {
                        let styled = indicator.apply_style(&new_config.indicator);
                        let paged = config::reloaded_pages(&self.config, &new_config)
                            .is_some_and(|pages| indicator.set_page_count(pages).changed());
                        self.config = new_config;
                        log::info!("Configuration reloaded");
                        if styled || paged {
                            SetOutcome::Applied
                        } else {
                            SetOutcome::NoOp
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to reload config: {}", e);
                        SetOutcome::NoOp
                    }
                },
            }
        };

        self.sync_content_size();
        if outcome.changed() {
            self.sync_band();
            self.drawing_area.queue_draw();
        }
    }
}

impl AppModel {
    fn sync_band(&self) {
        let indicator = self.indicator.borrow();
        self.registry
            .sync_band(indicator.layout().content, indicator.last_transition());
    }

    /// Forwards intrinsic size changes to GTK's size negotiation.
    fn sync_content_size(&self) {
        let size = {
            let mut indicator = self.indicator.borrow_mut();
            if !indicator.take_needs_resize() {
                return;
            }
            indicator.intrinsic_size()
        };
        self.drawing_area.set_content_width(size.width.ceil() as i32);
        self.drawing_area.set_content_height(size.height.ceil() as i32);
    }
}
