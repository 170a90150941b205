//! WhatsApp confirmation links

use url::Url;

use super::RsvpContact;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Build a `wa.me` link that opens a chat with `message` pre-filled
pub fn rsvp_url(phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(WHATSAPP_BASE)?.join(phone)?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

impl RsvpContact {
    /// Confirmation message for `family`
    pub fn message(&self, family: &str) -> String {
        self.template.replace("{family}", family)
    }

    /// Link for `family`
    pub fn url(&self, family: &str) -> Result<Url, url::ParseError> {
        rsvp_url(self.phone, &self.message(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_url_encoded() {
        let url = rsvp_url("5215512345678", "¡Hola! Soy Pérez").unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/5215512345678");
        let text: Vec<_> = url.query_pairs().collect();
        assert_eq!(text.len(), 1);
        assert_eq!(text[0].1, "¡Hola! Soy Pérez");
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn template_embeds_family_name() {
        let contact = RsvpContact { phone: "1", template: "Soy {family}." };
        assert_eq!(contact.message("Familia Robles"), "Soy Familia Robles.");
    }
}
