use eframe::egui;

pub struct Profile {
    pub handle: &'static str,
    pub initials: &'static str,
    pub bio: &'static str,
    pub joined: &'static str,
}

pub const NEXTJS: Profile = Profile {
    handle: "@nextjs",
    initials: "VA",
    bio: "The React Framework – created and maintained by @vercel.",
    joined: "Joined December 2021",
};

/// A link-styled handle that shows a profile preview while hovered
pub fn profile_link(ui: &mut egui::Ui, profile: &Profile) -> egui::Response {
    ui.add(egui::Button::new(egui::RichText::new(profile.handle).size(18.0).underline()).frame(false))
        .on_hover_ui(|ui| profile_card(ui, profile))
}

fn profile_card(ui: &mut egui::Ui, profile: &Profile) {
    ui.set_width(320.0);
    ui.horizontal(|ui| {
        avatar(ui, profile.initials);
        ui.vertical(|ui| {
            ui.strong(profile.handle);
            ui.label(profile.bio);
            ui.horizontal(|ui| {
                ui.label("📅");
                ui.weak(profile.joined);
            });
        });
    });
}

/// Circle with the fallback initials, there is no network to fetch a picture
fn avatar(ui: &mut egui::Ui, initials: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(40.0, 40.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 20.0, ui.visuals().widgets.inactive.bg_fill);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initials,
        egui::FontId::proportional(14.0),
        ui.visuals().text_color(),
    );
}
