//! Invitation flows
//!
//! A flow is the static description of one invitation: its ordered
//! sections, end-of-list behavior, login requirement and the content the
//! renderer draws for each section.

pub mod countdown;
pub mod rsvp;

use std::time::Duration;

use chrono::NaiveDateTime;
use clap::ValueEnum;

use crate::auth::session::SessionKeys;
use crate::navigation::rotation::GroupRotation;
use crate::navigation::{BoundaryPolicy, NavigatorConfig, Transition};

/// Which invitation to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowKind {
    /// Wedding of Cecilia & Eduardo
    #[value(alias = "cye")]
    Wedding,
    /// Astrid's quinceañera
    #[value(alias = "misxv")]
    Quince,
}

impl FlowKind {
    pub fn flow(self) -> &'static Flow {
        match self {
            FlowKind::Wedding => &WEDDING,
            FlowKind::Quince => &QUINCE,
        }
    }
}

/// How the renderer fills a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Fixed text
    Static,
    /// Rotating itinerary groups
    Itinerary,
    /// Rotating notes groups
    Notes,
    /// Countdown to the event
    Countdown,
    /// Guest list and RSVP link for the logged-in family
    Guests,
    /// RSVP link only, for flows without a login
    Rsvp,
}

/// One full-screen page
#[derive(Debug, Clone, Copy)]
pub struct SectionInfo {
    pub id: &'static str,
    /// Heading drawn at the top of the page
    pub title: &'static str,
    /// Short label for indicators
    pub label: &'static str,
    pub kind: SectionKind,
    pub body: &'static [&'static str],
}

/// A section whose intro animation is skipped when re-entered from
/// particular sections
#[derive(Debug, Clone, Copy)]
pub struct IntroRule {
    pub section: usize,
    pub suppress_from: &'static [usize],
}

impl IntroRule {
    /// Whether the intro should play after `transition`
    pub fn plays_intro(&self, transition: Option<&Transition>) -> bool {
        match transition {
            None => true,
            Some(t) if t.current != self.section => false,
            Some(t) => !self.suppress_from.contains(&t.previous),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ItineraryItem {
    pub time: &'static str,
    pub event: &'static str,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct Note {
    pub title: &'static str,
    pub description: &'static str,
}

/// WhatsApp confirmation target
#[derive(Debug, Clone, Copy)]
pub struct RsvpContact {
    pub phone: &'static str,
    /// Message template; `{family}` is replaced by the family name
    pub template: &'static str,
}

/// Static definition of an invitation
#[derive(Debug)]
pub struct Flow {
    pub kind: FlowKind,
    pub title: &'static str,
    pub sections: &'static [SectionInfo],
    pub boundary: BoundaryPolicy,
    /// Storage keys when the flow is behind a login
    pub session_keys: Option<SessionKeys>,
    pub mobile_only: bool,
    pub intro: Option<IntroRule>,
    /// Local date-time of the event, `%Y-%m-%dT%H:%M:%S`
    pub event_at: &'static str,
    pub itinerary: &'static [ItineraryItem],
    pub itinerary_rotation: GroupRotation,
    pub notes: &'static [Note],
    pub notes_rotation: GroupRotation,
    pub rsvp: Option<RsvpContact>,
}

impl Flow {
    pub fn requires_login(&self) -> bool {
        self.session_keys.is_some()
    }

    pub fn section(&self, index: usize) -> Option<&SectionInfo> {
        self.sections.get(index)
    }

    pub fn navigator_config(&self, cooldown: Duration) -> NavigatorConfig {
        NavigatorConfig { cooldown, boundary: self.boundary }
    }

    /// Parsed event date-time
    pub fn event_time(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(self.event_at, "%Y-%m-%dT%H:%M:%S")
    }
}

pub static WEDDING: Flow = Flow {
    kind: FlowKind::Wedding,
    title: "Cecilia & Eduardo",
    sections: &[
        SectionInfo {
            id: "cover",
            title: "Cecilia & Eduardo",
            label: "Portada",
            kind: SectionKind::Static,
            body: &["Nos casamos", "14 de Febrero, 2025"],
        },
        SectionInfo {
            id: "animation",
            title: "Nuestra historia",
            label: "Historia",
            kind: SectionKind::Static,
            body: &["Dos caminos que se encontraron para volverse uno solo."],
        },
        SectionInfo {
            id: "church",
            title: "Ceremonia religiosa",
            label: "Iglesia",
            kind: SectionKind::Static,
            body: &[
                "Parroquia de Nuestra Señora de las Nieves",
                "Calle José María Morelos 138, Loma Bonita, Cdad. Nezahualcóyotl, Méx.",
                "https://maps.app.goo.gl/yHt9nykoz1uCH9UXA",
            ],
        },
        SectionInfo {
            id: "reception",
            title: "Recepción",
            label: "Recepción",
            kind: SectionKind::Static,
            body: &[
                "La Cava By Eventos Premier GHR",
                "Presa del Sordo 5, Valle de los Pinos, Los Reyes Acaquilpan, Méx.",
                "https://maps.app.goo.gl/bsFsJ7F8wmnTftgQ8",
            ],
        },
        SectionInfo {
            id: "itinerary",
            title: "Programa del día",
            label: "Programa",
            kind: SectionKind::Itinerary,
            body: &[],
        },
        SectionInfo {
            id: "notes",
            title: "Notas importantes",
            label: "Notas",
            kind: SectionKind::Notes,
            body: &[],
        },
        SectionInfo {
            id: "gifts",
            title: "Mesa de regalos",
            label: "Regalos",
            kind: SectionKind::Static,
            body: &["Tu presencia es nuestro mejor regalo.", "Lluvia de sobres el día del evento."],
        },
        SectionInfo {
            id: "video",
            title: "Un mensaje para ti",
            label: "Video",
            kind: SectionKind::Static,
            body: &["Gracias por ser parte de nuestra vida."],
        },
        SectionInfo {
            id: "guests",
            title: "Confirma tu asistencia",
            label: "Invitados",
            kind: SectionKind::Guests,
            body: &[],
        },
    ],
    boundary: BoundaryPolicy::Clamp,
    session_keys: Some(SessionKeys { auth: "wedding-auth-cye", record: "wedding-family-cye" }),
    mobile_only: true,
    intro: None,
    event_at: "2025-02-14T16:00:00",
    itinerary: &[
        ItineraryItem {
            time: "16:00",
            event: "Ceremonia Religiosa",
            description: Some("Iglesia San José"),
        },
        ItineraryItem {
            time: "18:00",
            event: "Cocktail de Bienvenida",
            description: Some("Salón Los Jardines"),
        },
        ItineraryItem { time: "19:30", event: "Cena", description: Some("Salón Los Jardines") },
        ItineraryItem {
            time: "21:00",
            event: "Baile y Celebración",
            description: Some("¡Hasta que el cuerpo aguante!"),
        },
    ],
    itinerary_rotation: GroupRotation::new(3, Duration::from_secs(8)),
    notes: &[
        Note {
            title: "Niños Bienvenidos",
            description: "Nos encantaría que los niños nos acompañen. Contamos contigo para su supervisión.",
        },
        Note { title: "Vestimenta", description: "Formal / Cocktail" },
        Note { title: "Puntualidad", description: "Llegar 15 min antes de la ceremonia" },
        Note { title: "Sorpresas", description: "¡Y muchas más durante la celebración!" },
    ],
    notes_rotation: GroupRotation::new(2, Duration::from_secs(10)),
    rsvp: Some(RsvpContact {
        phone: "5215512345678",
        template: "¡Hola! Soy {family}. Confirmo mi asistencia a la boda de Eduardo y Cecilia el 14 de Febrero. ¡No puedo esperar a celebrar con ustedes!",
    }),
};

pub static QUINCE: Flow = Flow {
    kind: FlowKind::Quince,
    title: "Mis XV · Astrid",
    sections: &[
        SectionInfo {
            id: "hero",
            title: "Mis Quince",
            label: "Inicio",
            kind: SectionKind::Static,
            body: &[
                "Astrid",
                "Después de 15 años llenos de sueños, risas y aventuras, ha llegado el momento de celebrar juntos.",
            ],
        },
        SectionInfo {
            id: "invitation",
            title: "Invitación",
            label: "Invitación",
            kind: SectionKind::Static,
            body: &[
                "Con la gracia de Dios y el amor de mis padres, celebraré mis quince años.",
                "Será un honor contar con tu compañía.",
            ],
        },
        SectionInfo {
            id: "family",
            title: "Familia",
            label: "Familia",
            kind: SectionKind::Static,
            body: &[
                "Mamá: Wendy Beltrán Gallardo",
                "Papá: José Luis Valle Sánchez",
                "Madrina: Rocío Tapia Ortega",
                "Padrino: Eduardo Valle Méndez",
            ],
        },
        SectionInfo {
            id: "event",
            title: "Evento",
            label: "Evento",
            kind: SectionKind::Static,
            body: &["Salón el Arroyo", "Camino viejo a San Andrés s/N, Bo. de San Marcos, Zumpango, Edo. Mex."],
        },
        SectionInfo {
            id: "dress-code",
            title: "Vestimenta",
            label: "Vestimenta",
            kind: SectionKind::Static,
            body: &["Formal Vaquero", "Botas, sombrero y una sonrisa franca."],
        },
        SectionInfo {
            id: "countdown",
            title: "Tiempo",
            label: "Cuenta Regresiva",
            kind: SectionKind::Countdown,
            body: &[],
        },
        SectionInfo {
            id: "program",
            title: "Programa",
            label: "Programa",
            kind: SectionKind::Itinerary,
            body: &[],
        },
        SectionInfo {
            id: "gifts",
            title: "Regalos",
            label: "Regalos",
            kind: SectionKind::Static,
            body: &["Tu presencia es el mejor regalo.", "Lluvia de sobres."],
        },
        SectionInfo {
            id: "rsvp",
            title: "Confirmación",
            label: "RSVP",
            kind: SectionKind::Rsvp,
            body: &["Confirma tu asistencia con la familia de la quinceañera."],
        },
    ],
    boundary: BoundaryPolicy::Wrap,
    session_keys: None,
    mobile_only: true,
    intro: Some(IntroRule { section: 0, suppress_from: &[1, 7] }),
    event_at: "2025-11-08T14:30:00",
    itinerary: &[
        ItineraryItem { time: "14:30", event: "Misa de acción de gracias", description: None },
        ItineraryItem { time: "17:00", event: "Recepción", description: Some("Salón el Arroyo") },
        ItineraryItem { time: "19:00", event: "Vals", description: None },
        ItineraryItem { time: "20:00", event: "Cena", description: None },
        ItineraryItem { time: "21:30", event: "Baile", description: None },
    ],
    itinerary_rotation: GroupRotation::new(3, Duration::from_secs(8)),
    notes: &[],
    notes_rotation: GroupRotation::new(2, Duration::from_secs(10)),
    rsvp: Some(RsvpContact {
        phone: "+524433585542",
        template: "Hola! Quiero confirmar mi asistencia a los XV años de Astrid 💕",
    }),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_flows_have_nine_sections() {
        assert_eq!(WEDDING.sections.len(), 9);
        assert_eq!(QUINCE.sections.len(), 9);
    }

    #[test]
    fn wedding_clamps_and_quince_wraps() {
        assert_eq!(WEDDING.boundary, BoundaryPolicy::Clamp);
        assert_eq!(QUINCE.boundary, BoundaryPolicy::Wrap);
    }

    #[test]
    fn only_wedding_requires_login() {
        assert!(FlowKind::Wedding.flow().requires_login());
        assert!(!FlowKind::Quince.flow().requires_login());
    }

    #[test]
    fn event_times_parse() {
        assert!(WEDDING.event_time().is_ok());
        assert!(QUINCE.event_time().is_ok());
    }

    #[test]
    fn hero_intro_suppressed_from_second_and_gifts() {
        let rule = QUINCE.intro.unwrap();
        assert!(rule.plays_intro(None));
        assert!(rule.plays_intro(Some(&Transition { current: 0, previous: 8 })));
        assert!(!rule.plays_intro(Some(&Transition { current: 0, previous: 1 })));
        assert!(!rule.plays_intro(Some(&Transition { current: 0, previous: 7 })));
    }

    #[test]
    fn intro_only_applies_to_its_section() {
        let rule = QUINCE.intro.unwrap();
        assert!(!rule.plays_intro(Some(&Transition { current: 3, previous: 2 })));
    }

    #[test]
    fn every_rsvp_section_has_a_contact() {
        for flow in [&WEDDING, &QUINCE] {
            let needs_contact = flow
                .sections
                .iter()
                .any(|s| matches!(s.kind, SectionKind::Rsvp | SectionKind::Guests));
            assert_eq!(needs_contact, flow.rsvp.is_some(), "{:?}", flow.kind);
        }
    }

    #[test]
    fn navigator_config_uses_flow_boundary() {
        let config = QUINCE.navigator_config(Duration::from_millis(500));
        assert_eq!(config.boundary, BoundaryPolicy::Wrap);
        assert_eq!(config.cooldown, Duration::from_millis(500));
    }
}
