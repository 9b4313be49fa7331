use profile_schema::{
    check_image_src, ContactCard, IconSlot, ProfileData, CONTACT_CARDS,
    DEFAULT_CONTACT_FOOTER_TEXT, SOCIAL_CARDS,
};
use thiserror::Error;
use tracing::debug;

/// Every section starts a new page
pub const PAGE_BREAK_SELECTOR: &str = ".page-section";

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Image at {path} is not embeddable: {reason}")]
    InvalidImage { path: String, reason: String },
}

/// A4 at 96 dpi, portrait
const A4_PX: (u32, u32) = (794, 1123);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    fn css(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Printed page geometry, emitted as the `@page` rule
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub orientation: Orientation,
    pub margin_mm: f32,
    /// Each match starts a new page
    pub break_selector: String,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            margin_mm: 0.0,
            break_selector: PAGE_BREAK_SELECTOR.to_string(),
        }
    }
}

impl PageSetup {
    /// Page size in CSS pixels, width first
    pub fn size_px(&self) -> (u32, u32) {
        match self.orientation {
            Orientation::Portrait => A4_PX,
            Orientation::Landscape => (A4_PX.1, A4_PX.0),
        }
    }
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Read-only rendering: outbound contact links, no edit hooks
    pub view_mode: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    pub page: PageSetup,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            view_mode: false,
            pretty: true,
            indent: "  ".to_string(),
            page: PageSetup::default(),
        }
    }
}

impl CompileOptions {
    pub fn view() -> Self {
        Self {
            view_mode: true,
            ..Self::default()
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// Open a tag on its own line and indent
    fn open(&mut self, tag: &str) {
        self.add_line(tag);
        self.indent();
    }

    fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(tag);
    }

    fn editable(&self) -> bool {
        !self.options.view_mode
    }

    /// ` data-path="..."` in edit mode, nothing in view mode
    fn path_attr(&self, path: &str) -> String {
        if self.editable() {
            format!(" data-path=\"{}\"", escape_html(path))
        } else {
            String::new()
        }
    }

    /// One editable text field
    fn text(&mut self, tag: &str, class: &str, path: &str, value: &str) {
        let line = format!(
            "<{tag} class=\"{class}\"{attr}>{body}</{tag}>",
            tag = tag,
            class = class,
            attr = self.path_attr(path),
            body = escape_text(value),
        );
        self.add_line(&line);
    }

    /// Edit-only control, e.g. add/delete affordances
    fn control(&mut self, action: &str, target: &str, label: &str) {
        if self.editable() {
            let line = format!(
                "<button type=\"button\" class=\"edit-control\" data-action=\"{}\" data-target=\"{}\">{}</button>",
                action,
                escape_html(target),
                escape_html(label)
            );
            self.add_line(&line);
        }
    }

    /// An image slot: the image, an upload placeholder, or nothing
    fn image(&mut self, class: &str, path: &str, value: Option<&str>) -> Result<(), CompileError> {
        match value.filter(|v| !v.is_empty()) {
            Some(src) => {
                check_image(path, src)?;
                let line = format!(
                    "<img class=\"{}\" src=\"{}\" alt=\"\"{} />",
                    class,
                    escape_html(src),
                    self.path_attr(path)
                );
                self.add_line(&line);
            }
            None if self.editable() => {
                let line = format!(
                    "<div class=\"{} image-placeholder\"{}>Upload image</div>",
                    class,
                    self.path_attr(path)
                );
                self.add_line(&line);
            }
            None => {}
        }
        Ok(())
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a profile document to HTML
pub fn compile_to_html(
    document: &ProfileData,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(document, &mut ctx);

    let body_class = if ctx.editable() { "edit-mode" } else { "view-mode" };
    ctx.open(&format!("<body class=\"{}\">", body_class));
    ctx.open("<main id=\"profile\" class=\"profile-container\">");

    compile_hero(document, &mut ctx)?;
    compile_about(document, &mut ctx)?;
    compile_ceo_message(document, &mut ctx);
    compile_vision_mission(document, &mut ctx)?;
    compile_values(document, &mut ctx);
    compile_services(document, &mut ctx);
    compile_work_process(document, &mut ctx);
    compile_contact(document, &mut ctx)?;

    ctx.close("</main>");
    ctx.close("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    let html = ctx.get_output();
    debug!(bytes = html.len(), "Compiled profile");
    Ok(html)
}

fn compile_head(document: &ProfileData, ctx: &mut Context) {
    ctx.open("<head>");
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!(
        "<title>{} | Company Profile</title>",
        escape_html(&document.hero.brand_name)
    ));

    ctx.open("<style>");
    let page = ctx.options.page.clone();
    let (width, height) = page.size_px();
    ctx.add_line(&format!(
        "@page {{ size: A4 {}; margin: {}mm; }}",
        page.orientation.css(),
        page.margin_mm
    ));
    ctx.add_line("body { margin: 0; }");
    ctx.add_line(&format!(
        ".profile-container {{ width: {}px; margin: 0 auto; }}",
        width
    ));
    ctx.add_line(&format!(
        ".page-section {{ width: {}px; min-height: {}px; box-sizing: border-box; overflow: hidden; }}",
        width, height
    ));
    ctx.add_line(&format!(
        "{} {{ break-before: page; page-break-before: always; }}",
        page.break_selector
    ));
    ctx.add_line(&format!(
        "{}:first-child {{ break-before: auto; page-break-before: auto; }}",
        page.break_selector
    ));
    if ctx.editable() {
        ctx.add_line("@media print { .edit-control, .image-placeholder { display: none; } }");
    } else {
        ctx.add_line("body { user-select: none; -webkit-user-select: none; cursor: default; }");
        ctx.add_line("img { pointer-events: none; -webkit-user-drag: none; }");
        ctx.add_line(".page-section a:not(.clickable-link) { pointer-events: none; }");
    }
    ctx.close("</style>");

    ctx.close("</head>");
}

fn compile_hero(document: &ProfileData, ctx: &mut Context) -> Result<(), CompileError> {
    let hero = &document.hero;
    ctx.open("<section class=\"page-section hero\" id=\"hero\">");

    ctx.image("hero-logo", "hero.logo", hero.logo.as_deref())?;
    ctx.text("h2", "brand-name", "hero.brandName", &hero.brand_name);
    ctx.text("h1", "main-title", "hero.mainTitle", &hero.main_title);
    ctx.text("h1", "highlight", "hero.highlight", &hero.highlight);
    ctx.text("p", "subtitle", "hero.subtitle", &hero.subtitle);
    ctx.text("div", "hero-footer", "hero.footerText", &hero.footer_text);

    ctx.close("</section>");
    Ok(())
}

fn compile_about(document: &ProfileData, ctx: &mut Context) -> Result<(), CompileError> {
    let about = &document.about;
    ctx.open("<section class=\"page-section about\" id=\"about\">");

    ctx.text("h2", "section-title", "about.sectionTitle", &about.section_title);
    ctx.text("p", "description", "about.description", &about.description);
    ctx.image("about-icon", "about.mainIcon", about.main_icon.as_deref())?;

    for slot in [IconSlot::First, IconSlot::Second] {
        let name = slot.current(about);
        let action = if ctx.editable() {
            format!(" data-action=\"cycle-icon\" data-target=\"about.{}\"", slot.field())
        } else {
            String::new()
        };
        ctx.add_line(&format!(
            "<span class=\"floating-icon icon-{name}\" data-icon=\"{name}\"{action}></span>",
            name = escape_html(name),
            action = action,
        ));
    }

    ctx.close("</section>");
    Ok(())
}

fn compile_ceo_message(document: &ProfileData, ctx: &mut Context) {
    let ceo = &document.ceo_message;
    ctx.open("<section class=\"page-section ceo-message\" id=\"ceoMessage\">");

    ctx.text("h2", "section-title", "ceoMessage.title", &ceo.title);
    ctx.text("blockquote", "message", "ceoMessage.text", &ceo.text);
    ctx.open("<div class=\"signature\">");
    ctx.text("strong", "name", "ceoMessage.name", &ceo.name);
    ctx.text("span", "role", "ceoMessage.role", &ceo.role);
    ctx.text("span", "company", "ceoMessage.company", &ceo.company);
    ctx.close("</div>");

    ctx.close("</section>");
}

fn compile_vision_mission(document: &ProfileData, ctx: &mut Context) -> Result<(), CompileError> {
    let vm = &document.vision_mission;
    ctx.open("<section class=\"page-section vision-mission\" id=\"visionMission\">");

    ctx.text("h2", "section-title", "visionMission.sectionTitle", &vm.section_title);
    ctx.open("<div class=\"vision\">");
    ctx.text("h3", "title", "visionMission.visionTitle", &vm.vision_title);
    ctx.text("p", "text", "visionMission.visionText", &vm.vision_text);
    ctx.close("</div>");
    ctx.open("<div class=\"mission\">");
    ctx.text("h3", "title", "visionMission.missionTitle", &vm.mission_title);
    ctx.text("p", "text", "visionMission.missionText", &vm.mission_text);
    ctx.close("</div>");
    ctx.text("span", "year", "visionMission.year", &vm.year);
    ctx.image("vision-image", "visionMission.mainImage", vm.main_image.as_deref())?;

    ctx.close("</section>");
    Ok(())
}

fn compile_values(document: &ProfileData, ctx: &mut Context) {
    let values = &document.values;
    ctx.open("<section class=\"page-section values\" id=\"values\">");

    ctx.text("h2", "section-title", "values.sectionTitle", &values.section_title);
    ctx.open("<div class=\"value-grid\">");
    for (i, item) in values.items.iter().enumerate() {
        ctx.open("<article class=\"value-card\">");
        ctx.text("h3", "title", &format!("values.items.{}.title", i), &item.title);
        ctx.text(
            "p",
            "description",
            &format!("values.items.{}.description", i),
            &item.description,
        );
        ctx.control("delete-item", &format!("values.items.{}", i), "Delete");
        ctx.close("</article>");
    }
    ctx.close("</div>");
    ctx.control("add-item", "values.items", "Add value");

    ctx.close("</section>");
}

fn compile_services(document: &ProfileData, ctx: &mut Context) {
    let services = &document.services;
    ctx.open("<section class=\"page-section services\" id=\"services\">");

    ctx.text("h2", "section-title", "services.sectionTitle", &services.section_title);
    ctx.text("p", "section-subtitle", "services.sectionSubtitle", &services.section_subtitle);

    ctx.open("<div class=\"service-grid\">");
    for (i, service) in services.items.iter().enumerate() {
        ctx.open(&format!(
            "<article class=\"service-card\" data-id=\"{}\">",
            escape_html(&service.id)
        ));
        ctx.text("h3", "title", &format!("services.items.{}.title", i), &service.title);

        if let Some(lead) = service.lead() {
            ctx.text("p", "lead", &format!("services.items.{}.points.0", i), lead);
        }
        if !service.bullets().is_empty() {
            ctx.open("<ul class=\"points\">");
            for (j, bullet) in service.bullets().iter().enumerate() {
                let path = format!("services.items.{}.points.{}", i, j + 1);
                ctx.text("li", "point", &path, bullet);
            }
            ctx.close("</ul>");
        }

        ctx.control("add-point", &format!("services.items.{}.points", i), "Add point");
        ctx.control("delete-service", &service.id, "Delete");
        ctx.close("</article>");
    }
    ctx.close("</div>");
    ctx.control("add-item", "services.items", "Add service");

    ctx.close("</section>");
}

fn compile_work_process(document: &ProfileData, ctx: &mut Context) {
    let process = &document.work_process;
    ctx.open("<section class=\"page-section work-process\" id=\"workProcess\">");

    ctx.text("h2", "section-title", "workProcess.sectionTitle", &process.section_title);
    ctx.text(
        "p",
        "section-subtitle",
        "workProcess.sectionSubtitle",
        &process.section_subtitle,
    );

    ctx.open("<ol class=\"process-steps\">");
    for (i, step) in process.items.iter().enumerate() {
        ctx.open("<li class=\"process-step\">");
        ctx.text("h3", "title", &format!("workProcess.items.{}.title", i), &step.title);
        ctx.open("<ul class=\"points\">");
        for (j, point) in step.points.iter().enumerate() {
            let path = format!("workProcess.items.{}.points.{}", i, j);
            ctx.text("li", "point", &path, point);
        }
        ctx.close("</ul>");
        ctx.control("add-point", &format!("workProcess.items.{}.points", i), "Add point");
        ctx.control("delete-item", &format!("workProcess.items.{}", i), "Delete");
        ctx.close("</li>");
    }
    ctx.close("</ol>");
    ctx.control("add-item", "workProcess.items", "Add step");

    ctx.close("</section>");
}

fn compile_contact(document: &ProfileData, ctx: &mut Context) -> Result<(), CompileError> {
    let contact = &document.contact;
    ctx.open("<section class=\"page-section contact\" id=\"contact\">");

    ctx.text("h2", "section-title", "contact.sectionTitle", &contact.section_title);
    ctx.text(
        "p",
        "section-subtitle",
        "contact.sectionSubtitle",
        &contact.section_subtitle,
    );
    let footer_text = contact
        .footer_text
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CONTACT_FOOTER_TEXT);
    ctx.text("p", "contact-intro", "contact.footerText", footer_text);

    ctx.open("<div class=\"contact-cards\">");
    for card in CONTACT_CARDS.iter() {
        compile_contact_card(card, document, ctx);
    }
    ctx.close("</div>");

    ctx.open("<div class=\"social-links\">");
    for card in SOCIAL_CARDS.iter() {
        compile_contact_card(card, document, ctx);
    }
    ctx.close("</div>");

    ctx.text("p", "address", "contact.address", &contact.address);

    if contact.footer_visible() {
        ctx.open("<footer class=\"profile-footer\">");
        ctx.image("footer-logo", "contact.footerLogo", contact.footer_logo.as_deref())?;
        ctx.text("span", "copyright", "contact.footerCopyright", &contact.footer_copyright);
        ctx.control("hide-footer", "contact.showFooter", "Remove footer");
        ctx.close("</footer>");
    } else {
        ctx.control("show-footer", "contact.showFooter", "Show footer");
    }

    ctx.close("</section>");
    Ok(())
}

fn compile_contact_card(card: &ContactCard, document: &ProfileData, ctx: &mut Context) {
    let contact = &document.contact;
    let path = format!("contact.{}", card.field);

    match card.href(contact, ctx.options.view_mode) {
        Some(href) => ctx.open(&format!(
            "<a class=\"contact-card clickable-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
            escape_html(&href)
        )),
        None => ctx.open("<div class=\"contact-card\">"),
    }

    ctx.add_line(&format!(
        "<span class=\"label\">{}</span>",
        escape_html(card.label)
    ));
    ctx.text("span", "value", &path, card.value(contact));

    if ctx.options.view_mode && card.link.is_some() {
        ctx.close("</a>");
    } else {
        ctx.close("</div>");
    }
}

fn check_image(path: &str, src: &str) -> Result<(), CompileError> {
    check_image_src(src).map_err(|reason| CompileError::InvalidImage {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escaped text with line breaks kept
fn escape_text(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}
