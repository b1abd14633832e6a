use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, MouseEvent, SubmitEvent};
use yew::prelude::*;

use crate::config::{PageConfig, FALLBACK_IMAGE};
use crate::contact::{ContactField, ContactForm, SendTicket, SubmitStatus};
use crate::dom::{self, DocumentRoot, LocalStorage, RevealObserver};
use crate::images::{log_image_fallback, resolve_image};
use crate::logging::{log_event, set_min_level, LogLevel};
use crate::pointer::{self, PointerPosition, IDENTITY_TRANSFORM};
use crate::reveal::RevealTracker;
use crate::starfield::StarField;
use crate::theme::{self, Theme};

const NAME: &str = "Himanshu Choudhary";
const ROLE: &str = "Flutter Developer • Full‑Stack Learner";
const ABOUT: &str = "Flutter developer with 2.5+ years experience, focused on clean architecture, Riverpod state, and delightful UX. Built 20+ shipped projects with 99% quick response across clients.";
const AVATAR: &str = "https://images.unsplash.com/photo-1544723795-3fb6469f5b39?q=80&w=800&auto=format&fit=crop";
const CONTACT_EMAIL: &str = "hello.himanshu@example.com";

const STATS: &[(&str, &str)] = &[("Years", "2.5+"), ("Projects", "20+"), ("Response", "99%")];

struct Project {
    title: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    image: &'static str,
    playstore: &'static str,
    appstore: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Patient Health Records App",
        description: "Secure EHR viewer with Riverpod, bottom sheets, filtering, and unit toggles.",
        tags: &["Flutter", "Riverpod", "Security"],
        image: "https://images.unsplash.com/photo-1551076805-e1869033e561?q=80&w=1200&auto=format&fit=crop",
        playstore: "#",
        appstore: "#",
    },
    Project {
        title: "InstantSaver",
        description: "Instagram reels & photo saver with repost workflows and clean UX.",
        tags: &["Flutter", "Dart", "Android"],
        image: "https://images.unsplash.com/photo-1515378791036-0648a3ef77b2?q=80&w=1200&auto=format&fit=crop",
        playstore: "#",
        appstore: "#",
    },
    Project {
        title: "Portfolio v3",
        description: "Rust + Yew personal site with glass morphism & parallax.",
        tags: &["Rust", "Yew", "WebAssembly"],
        image: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?q=80&w=1200&auto=format&fit=crop",
        playstore: "#",
        appstore: "#",
    },
];

struct Experience {
    company: &'static str,
    role: &'static str,
    period: &'static str,
    points: &'static [&'static str],
}

const EXPERIENCE: &[Experience] = &[
    Experience {
        company: "Freelance",
        role: "Flutter Developer",
        period: "2023 — Present",
        points: &[
            "Shipped 20+ client apps with scalable architectures and pixel-perfect UIs.",
            "Integrated analytics, crash reporting, and secure storage best practices.",
            "Automated CI/CD with Play Console delivery and fastlane.",
        ],
    },
    Experience {
        company: "Open Source",
        role: "Contributor",
        period: "2022 — Present",
        points: &[
            "Built widgets (Height/Weight selectors) with custom rulers and unit toggles.",
            "Auth flows with Flutter Secure Storage and token lifecycle handling.",
        ],
    },
];

const DEVICON: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";
const FLUTTER_MARK: &str = "https://cdn.simpleicons.org/flutter/02569B";

// (name, logo, hint)
const SKILLS: &[(&str, &str, Option<&str>)] = &[
    ("Flutter", "flutter/flutter-original.svg", None),
    ("Dart", "dart/dart-original.svg", None),
    ("GoRouter", FLUTTER_MARK, Some("Flutter routing")),
    ("Riverpod", FLUTTER_MARK, Some("State management")),
    ("Bloc", FLUTTER_MARK, Some("State management")),
    ("GetX", FLUTTER_MARK, Some("State management")),
    ("Firebase", "firebase/firebase-plain.svg", None),
    ("Supabase", "https://cdn.simpleicons.org/supabase/3FCF8E", None),
    ("SQLite", "sqlite/sqlite-original.svg", None),
    ("Hive", FLUTTER_MARK, Some("Local DB")),
    ("Next.js", "nextjs/nextjs-original.svg", None),
    ("TypeScript", "typescript/typescript-original.svg", None),
    ("Tailwind", "tailwindcss/tailwindcss-plain.svg", None),
    ("Node.js", "nodejs/nodejs-original.svg", None),
    ("GraphQL", "graphql/graphql-plain.svg", None),
    ("REST APIs", "https://cdn.simpleicons.org/openapiinitiative/6BA539", None),
    ("Git", "git/git-original.svg", None),
    ("CI/CD", "https://cdn.simpleicons.org/githubactions/2088FF", None),
];

const SOCIAL_LINKS: &[(&str, &str)] = &[
    ("GitHub", "https://github.com"),
    ("LinkedIn", "https://www.linkedin.com"),
    ("X", "https://x.com"),
];

fn skill_logo(logo: &str) -> String {
    if logo.starts_with("https://") {
        logo.to_string()
    } else {
        format!("{DEVICON}/{logo}")
    }
}

#[derive(Properties, PartialEq)]
struct FallbackImageProps {
    src: AttrValue,
    alt: AttrValue,
    #[prop_or_default]
    class: Classes,
}

/// Image that swaps to the placeholder once if its host is not allowed or the
/// load fails.
#[function_component(FallbackImage)]
fn fallback_image(props: &FallbackImageProps) -> Html {
    let src = {
        let requested = props.src.clone();
        use_state(move || AttrValue::from(resolve_image(&requested)))
    };

    let onerror = {
        let src = src.clone();
        Callback::from(move |_: Event| {
            if src.as_str() != FALLBACK_IMAGE {
                log_image_fallback(src.as_str(), "load error");
                src.set(AttrValue::from(FALLBACK_IMAGE));
            }
        })
    };

    html! {
        <img
            class={props.class.clone()}
            src={(*src).clone()}
            alt={props.alt.clone()}
            loading="lazy"
            {onerror}
        />
    }
}

#[derive(Properties, PartialEq)]
struct StarsProps {
    count: usize,
}

#[function_component(Stars)]
fn stars(props: &StarsProps) -> Html {
    let container = use_node_ref();

    {
        let container = container.clone();
        let count = props.count;
        use_effect_with((), move |_| {
            let mut field = StarField::<Element>::default();
            if let Some(element) = container.cast::<HtmlElement>() {
                let mounted = dom::document().and_then(|document| {
                    field.mount(
                        count,
                        js_sys::Math::random,
                        |star| dom::attach_star(&document, &element, star),
                        |star| star.remove(),
                    )
                });
                match mounted {
                    Ok(stars) => log_event(
                        LogLevel::Debug,
                        "star_field_mounted",
                        json!({ "stars": stars }),
                    ),
                    Err(error) => log_event(
                        LogLevel::Warn,
                        "star_field_mount_failed",
                        json!({ "error": error.to_string() }),
                    ),
                }
            }

            move || {
                let removed = field.unmount(|star| star.remove());
                log_event(
                    LogLevel::Debug,
                    "star_field_unmounted",
                    json!({ "stars": removed }),
                );
            }
        });
    }

    html! {
        <div ref={container} class="star-field" aria-hidden="true" />
    }
}

#[derive(Properties, PartialEq)]
struct TiltCardProps {
    divisor: f64,
    children: Html,
}

#[function_component(TiltCard)]
fn tilt_card(props: &TiltCardProps) -> Html {
    let node = use_node_ref();

    let onmousemove = {
        let node = node.clone();
        let divisor = props.divisor;
        Callback::from(move |event: MouseEvent| {
            let Ok(bounds) = dom::element_bounds(&node) else {
                return;
            };
            let position = PointerPosition::new(f64::from(event.client_x()), f64::from(event.client_y()));
            dom::set_style(&node, "transform", &pointer::tilt(position, bounds, divisor));
        })
    };

    let onmouseleave = {
        let node = node.clone();
        Callback::from(move |_: MouseEvent| {
            dom::set_style(&node, "transform", IDENTITY_TRANSFORM);
        })
    };

    html! {
        <div ref={node} class="glass project-card" {onmousemove} {onmouseleave}>
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MagneticLinkProps {
    href: AttrValue,
    label: AttrValue,
}

#[function_component(MagneticLink)]
fn magnetic_link(props: &MagneticLinkProps) -> Html {
    let node = use_node_ref();

    let onmousemove = {
        let node = node.clone();
        Callback::from(move |event: MouseEvent| {
            let Ok(bounds) = dom::element_bounds(&node) else {
                return;
            };
            let position = PointerPosition::new(f64::from(event.client_x()), f64::from(event.client_y()));
            dom::set_style(&node, "transform", &pointer::magnetic(position, bounds));
        })
    };

    let onmouseleave = {
        let node = node.clone();
        Callback::from(move |_: MouseEvent| {
            dom::set_style(&node, "transform", IDENTITY_TRANSFORM);
        })
    };

    html! {
        <a
            ref={node}
            class="social-link"
            href={props.href.clone()}
            target="_blank"
            rel="noopener noreferrer"
            {onmousemove}
            {onmouseleave}
        >
            {props.label.clone()}
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

enum ContactAction {
    Edit(ContactField, String),
    Submit,
    Complete(SendTicket),
    Dismiss(u64),
}

#[derive(Default, PartialEq)]
struct ContactState(ContactForm);

impl Reducible for ContactState {
    type Action = ContactAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut form = self.0.clone();
        match action {
            ContactAction::Edit(field, value) => form.edit(field, value),
            ContactAction::Submit => {
                if let Err(error) = form.submit() {
                    log_event(
                        LogLevel::Debug,
                        "contact_submit_refused",
                        json!({ "error": error.to_string() }),
                    );
                }
            }
            ContactAction::Complete(ticket) => {
                form.complete_send(ticket);
            }
            ContactAction::Dismiss(id) => {
                form.dismiss_notice(id);
            }
        }
        Rc::new(Self(form))
    }
}

#[derive(Properties, PartialEq)]
struct ContactSectionProps {
    submit_delay_ms: u32,
    notice_timeout_ms: u32,
}

#[function_component(ContactSection)]
fn contact_section(props: &ContactSectionProps) -> Html {
    let contact = use_reducer(ContactState::default);

    // Dropping the timeout cancels it, so a pending send never lands on an
    // unmounted form.
    {
        let dispatcher = contact.dispatcher();
        let delay = props.submit_delay_ms;
        use_effect_with(contact.0.pending(), move |pending| {
            let timeout = pending.map(|ticket| {
                Timeout::new(delay, move || dispatcher.dispatch(ContactAction::Complete(ticket)))
            });
            move || drop(timeout)
        });
    }

    {
        let dispatcher = contact.dispatcher();
        let delay = props.notice_timeout_ms;
        let notice_id = contact.0.notice().map(|notice| notice.id);
        use_effect_with(notice_id, move |notice_id| {
            let timeout = notice_id.map(|id| {
                Timeout::new(delay, move || dispatcher.dispatch(ContactAction::Dismiss(id)))
            });
            move || drop(timeout)
        });
    }

    let onsubmit = {
        let dispatcher = contact.dispatcher();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            dispatcher.dispatch(ContactAction::Submit);
        })
    };

    let field_input = |field: ContactField| -> Html {
        let dispatcher = contact.dispatcher();
        let value = contact.0.fields().get(field).to_string();
        let oninput = Callback::from(move |event: InputEvent| {
            let value = match field {
                ContactField::Message => event.target_unchecked_into::<HtmlTextAreaElement>().value(),
                _ => event.target_unchecked_into::<HtmlInputElement>().value(),
            };
            dispatcher.dispatch(ContactAction::Edit(field, value));
        });
        let id = format!("contact-{}", field.as_str());

        let control = match field {
            ContactField::Message => html! {
                <textarea
                    id={id.clone()}
                    name={field.as_str()}
                    rows="5"
                    placeholder={field.placeholder()}
                    {value}
                    {oninput}
                />
            },
            ContactField::Email => html! {
                <input
                    id={id.clone()}
                    type="email"
                    name={field.as_str()}
                    placeholder={field.placeholder()}
                    {value}
                    {oninput}
                />
            },
            _ => html! {
                <input
                    id={id.clone()}
                    name={field.as_str()}
                    placeholder={field.placeholder()}
                    {value}
                    {oninput}
                />
            },
        };

        html! {
            <div class="field">
                <label for={id}>{field.label()}<span class="required">{" *"}</span></label>
                {control}
            </div>
        }
    };

    let sending = contact.0.status() == SubmitStatus::Sending;

    html! {
        <section id="contact" data-reveal="contact" class="section reveal">
            <div class="section-head">
                <h2>{"Let’s build something incredible"}</h2>
                <span class="chip">{"Replies in hours (99%)"}</span>
            </div>
            <div class="contact-grid">
                <div class="glass">
                    <form class="contact-form" novalidate={true} {onsubmit}>
                        { for ContactField::ALL.into_iter().map(field_input) }
                        <button type="submit" class="button-primary" disabled={sending}>
                            { if sending { "Sending…" } else { "Send Message" } }
                        </button>
                    </form>
                </div>
                <div class="contact-aside">
                    <div class="glass">
                        <h3>{"Contact Details"}</h3>
                        <ul>
                            <li>{CONTACT_EMAIL}</li>
                            <li>{"India"}</li>
                        </ul>
                        <p>{"Open to freelance & full-time Flutter roles. Happy to collaborate with product teams and founders."}</p>
                    </div>
                    <div class="glass">
                        <h3>{"Why me?"}</h3>
                        <ul class="checks">
                            <li>{"2.5+ years building robust Flutter apps"}</li>
                            <li>{"20+ projects shipped end‑to‑end"}</li>
                            <li>{"99% quick response • proactive comms"}</li>
                        </ul>
                    </div>
                </div>
            </div>
            {
                contact.0.notice().map(|notice| html! {
                    <div class="toast" role="status">
                        <div class="toast-title">{notice.title()}</div>
                        <div class="toast-description">{notice.description()}</div>
                    </div>
                })
            }
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<PageConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let theme = use_state(|| theme::resolve(&LocalStorage, dom::system_prefers_dark()).0);
    let cursor = use_node_ref();
    let spotlight = use_node_ref();
    let avatar = use_node_ref();

    {
        let current = *theme;
        use_effect_with((), move |_| {
            dom::apply_theme(current);
            || ()
        });
    }

    // Global pointer effects, coalesced to one update per animation frame.
    {
        let cursor = cursor.clone();
        let spotlight = spotlight.clone();
        let avatar = avatar.clone();
        let avatar_reset = avatar.clone();
        let multiplier = config.parallax_multiplier;
        use_effect_with((), move |_| {
            let latest = Rc::new(Cell::new(PointerPosition::default()));
            let scheduled = Rc::new(Cell::new(false));
            let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));

            let listener = window().map(|win| {
                let latest = latest.clone();
                let frame = frame.clone();
                EventListener::new(&win, "mousemove", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    latest.set(PointerPosition::new(
                        f64::from(event.client_x()),
                        f64::from(event.client_y()),
                    ));

                    if scheduled.replace(true) {
                        return;
                    }

                    let latest = latest.clone();
                    let scheduled = scheduled.clone();
                    let cursor = cursor.clone();
                    let spotlight = spotlight.clone();
                    let avatar = avatar.clone();
                    let handle = request_animation_frame(move |_| {
                        scheduled.set(false);
                        let position = latest.get();
                        dom::set_style(&cursor, "transform", &pointer::cursor_ring(position));
                        dom::set_style(&spotlight, "background", &pointer::spotlight(position));
                        dom::set_style(
                            &avatar,
                            "transform",
                            &pointer::parallax(position, dom::viewport_size(), multiplier),
                        );
                    });
                    // Replacing drops the previous, already fired frame.
                    *frame.borrow_mut() = Some(handle);
                })
            });

            let leave_listener = window()
                .and_then(|win| win.document())
                .and_then(|document| document.document_element())
                .map(|root| {
                    EventListener::new(&root, "mouseleave", move |_| {
                        dom::set_style(&avatar_reset, "transform", IDENTITY_TRANSFORM);
                    })
                });

            move || {
                drop(listener);
                drop(leave_listener);
                frame.borrow_mut().take();
            }
        });
    }

    {
        let threshold = config.reveal_threshold;
        use_effect_with((), move |_| {
            let observer = RevealObserver::attach(threshold, Rc::new(RefCell::new(RevealTracker::default())));
            move || drop(observer)
        });
    }

    let on_toggle = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme::toggle(*theme, &LocalStorage, &DocumentRoot);
            theme.set(next);
        })
    };

    let on_back_to_top = Callback::from(|_: MouseEvent| dom::scroll_to_top());

    let toggle_icon = match *theme {
        Theme::Dark => "☀",
        Theme::Light => "☾",
    };

    html! {
        <main class="page">
            <Stars count={config.star_count} />
            <div ref={spotlight} class="spotlight" aria-hidden="true" />
            <div ref={cursor} id="cursor" class="cursor-ring" aria-hidden="true" />

            <header class="site-header">
                <div class="brand">
                    <span class="brand-mark" aria-hidden="true">{"⚡"}</span>
                    <span>{"Himanshu.dev"}</span>
                </div>
                <nav class="site-nav">
                    <a href="#projects">{"Projects"}</a>
                    <a href="#skills">{"Skills"}</a>
                    <a href="#experience">{"Experience"}</a>
                    <a href="#contact">{"Contact"}</a>
                </nav>
                <div class="header-actions">
                    <a href="#contact" class="button-primary">{"Hire Me"}</a>
                    <button
                        class="theme-toggle"
                        type="button"
                        aria-label={(*theme).toggle_label()}
                        aria-pressed={(*theme).is_dark().to_string()}
                        onclick={on_toggle}
                    >
                        <span aria-hidden="true">{toggle_icon}</span>
                    </button>
                </div>
            </header>

            <section class="hero section">
                <div class="hero-copy">
                    <span class="chip">{"Available for freelance"}</span>
                    <h1 class="gradient-text">{NAME}</h1>
                    <p class="role">{ROLE}</p>
                    <p class="about">{ABOUT}</p>
                    <div class="stats">
                        { for STATS.iter().map(|(label, value)| html! {
                            <div class="glass stat">
                                <div class="stat-value">{*value}</div>
                                <div class="stat-label">{*label}</div>
                            </div>
                        }) }
                    </div>
                </div>
                <div class="glass hero-card">
                    <div ref={avatar} class="avatar">
                        <FallbackImage src={AVATAR} alt={NAME} />
                    </div>
                    <div class="hero-card-footer">
                        <span>{"Top-rated • Futuristic UI"}</span>
                        <a href="#contact" class="button-primary">{"Hire Me"}</a>
                    </div>
                </div>
            </section>

            <section id="skills" data-reveal="skills" class="section reveal">
                <div class="section-head">
                    <h2>{"Core Skills"}</h2>
                    <span class="chip">{"Clean architecture • DX"}</span>
                </div>
                <div class="glass skills-grid">
                    { for SKILLS.iter().map(|(name, logo, hint)| html! {
                        <div class="skill" title={hint.unwrap_or(*name)}>
                            <FallbackImage
                                class={classes!("skill-logo")}
                                src={skill_logo(logo)}
                                alt={format!("{name} logo")}
                            />
                            <span>{*name}</span>
                        </div>
                    }) }
                </div>
            </section>

            <section id="projects" data-reveal="projects" class="section reveal">
                <div class="section-head">
                    <h2>{"Selected Projects"}</h2>
                    <span class="chip">{"20+ delivered"}</span>
                </div>
                <div class="project-grid">
                    { for PROJECTS.iter().map(|project| html! {
                        <TiltCard divisor={config.tilt_divisor}>
                            <FallbackImage class={classes!("project-image")} src={project.image} alt={project.title} />
                            <div class="project-body">
                                <h3>{project.title}</h3>
                                <p>{project.description}</p>
                                <div class="tags">
                                    { for project.tags.iter().map(|tag| html! { <span class="tag">{*tag}</span> }) }
                                </div>
                                <div class="store-links">
                                    <a href={project.playstore} class="store-link">{"Play Store"}</a>
                                    <a href={project.appstore} class="store-link">{"App Store"}</a>
                                </div>
                            </div>
                        </TiltCard>
                    }) }
                </div>
            </section>

            <section id="experience" data-reveal="experience" class="section reveal">
                <div class="section-head">
                    <h2>{"Experience"}</h2>
                    <span class="chip">{"Impact & Ownership"}</span>
                </div>
                <div class="timeline">
                    { for EXPERIENCE.iter().map(|entry| html! {
                        <div class="timeline-entry">
                            <div class="glass">
                                <div class="period">{entry.period}</div>
                                <div class="position">{format!("{} • {}", entry.role, entry.company)}</div>
                            </div>
                            <ul class="checks">
                                { for entry.points.iter().map(|point| html! { <li>{*point}</li> }) }
                            </ul>
                        </div>
                    }) }
                </div>
            </section>

            <ContactSection
                submit_delay_ms={config.submit_delay_ms}
                notice_timeout_ms={config.notice_timeout_ms}
            />

            <footer class="site-footer">
                <p>{format!("© {} {NAME}. All rights reserved.", current_year())}</p>
                <div class="social-links">
                    { for SOCIAL_LINKS.iter().map(|(label, href)| html! {
                        <MagneticLink href={*href} label={*label} />
                    }) }
                </div>
                <button type="button" class="button-ghost" onclick={on_back_to_top}>{"Back to top"}</button>
            </footer>
        </main>
    }
}

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

pub fn run() {
    let config = PageConfig::from_build_env();
    set_min_level(config.log_level);

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
}
