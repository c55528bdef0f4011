use eframe::egui;

pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const ENTRIES: [FaqEntry; 2] = [
    FaqEntry {
        question: "Is it accessible?",
        answer: "Yes. It adheres to the WAI-ARIA design pattern.",
    },
    FaqEntry {
        question: "What are universal components?",
        answer: "In the world of React Native, universal components are components that work on both web and native platforms.",
    },
];

/// Accordion of independent collapsible entries, the first one open by default
pub fn faq(ui: &mut egui::Ui) {
    ui.scope(|ui| {
        ui.set_max_width(384.0);
        for (index, entry) in ENTRIES.iter().enumerate() {
            egui::CollapsingHeader::new(entry.question)
                .id_salt(("faq", index))
                .default_open(index == 0)
                .show(ui, |ui| {
                    ui.label(entry.answer);
                });
        }
    });
}
