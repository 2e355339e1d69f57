//! Translation catalog for modal strings
//!
//! The modal never hard-codes user-facing text; it asks a [`Translate`]
//! implementation for each [`I18nKey`]. [`Catalog`] is the built-in
//! implementation with a handful of locales and English as fallback.

/// Keys of every translated string the microagents modal uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum I18nKey {
    /// Modal title
    MicroagentsModalTitle,
    /// Banner shown under the title once the runtime is ready
    MicroagentsModalWarning,
    /// Heading above the trigger pills
    MicroagentsModalTriggers,
    /// Heading above the content block
    MicroagentsModalContent,
    /// Placeholder for a microagent without content
    MicroagentsModalNoContent,
    /// Message shown when the fetch failed
    MicroagentsModalFetchError,
    /// Message shown when the conversation has no microagents
    ConversationNoMicroagents,
    /// Placeholder while the runtime is still starting
    WaitingForRuntime,
    /// Label of the refresh button
    ButtonRefresh,
}

impl I18nKey {
    /// Every key
    pub const ALL: [I18nKey; 9] = [
        I18nKey::MicroagentsModalTitle,
        I18nKey::MicroagentsModalWarning,
        I18nKey::MicroagentsModalTriggers,
        I18nKey::MicroagentsModalContent,
        I18nKey::MicroagentsModalNoContent,
        I18nKey::MicroagentsModalFetchError,
        I18nKey::ConversationNoMicroagents,
        I18nKey::WaitingForRuntime,
        I18nKey::ButtonRefresh,
    ];

    /// Stable identifier shared with the web client's translation files
    pub fn id(self) -> &'static str {
        match self {
            I18nKey::MicroagentsModalTitle => "MICROAGENTS_MODAL$TITLE",
            I18nKey::MicroagentsModalWarning => "MICROAGENTS_MODAL$WARNING",
            I18nKey::MicroagentsModalTriggers => "MICROAGENTS_MODAL$TRIGGERS",
            I18nKey::MicroagentsModalContent => "MICROAGENTS_MODAL$CONTENT",
            I18nKey::MicroagentsModalNoContent => "MICROAGENTS_MODAL$NO_CONTENT",
            I18nKey::MicroagentsModalFetchError => "MICROAGENTS_MODAL$FETCH_ERROR",
            I18nKey::ConversationNoMicroagents => "CONVERSATION$NO_MICROAGENTS",
            I18nKey::WaitingForRuntime => "DIFF_VIEWER$WAITING_FOR_RUNTIME",
            I18nKey::ButtonRefresh => "BUTTON$REFRESH",
        }
    }
}

/// Resolves translation keys to display text
pub trait Translate {
    /// Text for `key`
    fn t(&self, key: I18nKey) -> &str;
}

/// Locales shipped with the built-in catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// German
    De,
    /// Spanish
    Es,
    /// French
    Fr,
    /// Japanese
    Ja,
    /// Simplified Chinese
    ZhCn,
}

impl Locale {
    /// Parse a language tag such as `de`, `de-DE`, `zh_CN` or `ja.UTF-8`.
    /// Unknown tags fall back to English.
    pub fn parse(tag: &str) -> Self {
        let tag = tag
            .split('.')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .replace('_', "-");
        let language = tag.split('-').next().unwrap_or_default();
        match language {
            "de" => Locale::De,
            "es" => Locale::Es,
            "fr" => Locale::Fr,
            "ja" => Locale::Ja,
            "zh" => Locale::ZhCn,
            _ => Locale::En,
        }
    }
}

/// Built-in translation catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    /// Catalog for `locale`
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Translate for Catalog {
    fn t(&self, key: I18nKey) -> &str {
        lookup(self.locale, key)
    }
}

fn lookup(locale: Locale, key: I18nKey) -> &'static str {
    use I18nKey::*;
    match (locale, key) {
        (Locale::En, MicroagentsModalTitle) => "Available Microagents",
        (Locale::En, MicroagentsModalWarning) => {
            "Changes to microagents are only picked up when a new conversation starts."
        }
        (Locale::En, MicroagentsModalTriggers) => "Triggers",
        (Locale::En, MicroagentsModalContent) => "Content",
        (Locale::En, MicroagentsModalNoContent) => "Microagent has no content",
        (Locale::En, MicroagentsModalFetchError) => {
            "Failed to fetch microagents. Please try again later."
        }
        (Locale::En, ConversationNoMicroagents) => {
            "No available microagents found for this conversation."
        }
        (Locale::En, WaitingForRuntime) => "Waiting for runtime to start...",
        (Locale::En, ButtonRefresh) => "Refresh",

        (Locale::De, MicroagentsModalTitle) => "Verfügbare Microagents",
        (Locale::De, MicroagentsModalWarning) => {
            "Änderungen an Microagents werden erst beim Start einer neuen Unterhaltung übernommen."
        }
        (Locale::De, MicroagentsModalTriggers) => "Auslöser",
        (Locale::De, MicroagentsModalContent) => "Inhalt",
        (Locale::De, MicroagentsModalNoContent) => "Microagent hat keinen Inhalt",
        (Locale::De, MicroagentsModalFetchError) => {
            "Microagents konnten nicht abgerufen werden. Bitte versuchen Sie es später erneut."
        }
        (Locale::De, ConversationNoMicroagents) => {
            "Für diese Unterhaltung wurden keine Microagents gefunden."
        }
        (Locale::De, WaitingForRuntime) => "Warte auf den Start der Laufzeitumgebung...",
        (Locale::De, ButtonRefresh) => "Aktualisieren",

        (Locale::Es, MicroagentsModalTitle) => "Microagentes disponibles",
        (Locale::Es, MicroagentsModalWarning) => {
            "Los cambios en los microagentes solo se aplican al iniciar una nueva conversación."
        }
        (Locale::Es, MicroagentsModalTriggers) => "Disparadores",
        (Locale::Es, MicroagentsModalContent) => "Contenido",
        (Locale::Es, MicroagentsModalNoContent) => "El microagente no tiene contenido",
        (Locale::Es, MicroagentsModalFetchError) => {
            "No se pudieron obtener los microagentes. Inténtelo de nuevo más tarde."
        }
        (Locale::Es, ConversationNoMicroagents) => {
            "No se encontraron microagentes para esta conversación."
        }
        (Locale::Es, WaitingForRuntime) => {
            "Esperando a que se inicie el entorno de ejecución..."
        }
        (Locale::Es, ButtonRefresh) => "Actualizar",

        (Locale::Fr, MicroagentsModalTitle) => "Microagents disponibles",
        (Locale::Fr, MicroagentsModalWarning) => {
            "Les modifications des microagents ne sont prises en compte qu'au démarrage d'une nouvelle conversation."
        }
        (Locale::Fr, MicroagentsModalTriggers) => "Déclencheurs",
        (Locale::Fr, MicroagentsModalContent) => "Contenu",
        (Locale::Fr, MicroagentsModalNoContent) => "Le microagent n'a pas de contenu",
        (Locale::Fr, MicroagentsModalFetchError) => {
            "Impossible de récupérer les microagents. Veuillez réessayer plus tard."
        }
        (Locale::Fr, ConversationNoMicroagents) => {
            "Aucun microagent disponible pour cette conversation."
        }
        (Locale::Fr, WaitingForRuntime) => {
            "En attente du démarrage de l'environnement d'exécution..."
        }
        (Locale::Fr, ButtonRefresh) => "Actualiser",

        (Locale::Ja, MicroagentsModalTitle) => "利用可能なマイクロエージェント",
        (Locale::Ja, MicroagentsModalWarning) => {
            "マイクロエージェントの変更は新しい会話を開始したときにのみ反映されます。"
        }
        (Locale::Ja, MicroagentsModalTriggers) => "トリガー",
        (Locale::Ja, MicroagentsModalContent) => "内容",
        (Locale::Ja, MicroagentsModalNoContent) => "このマイクロエージェントには内容がありません",
        (Locale::Ja, MicroagentsModalFetchError) => {
            "マイクロエージェントの取得に失敗しました。しばらくしてから再試行してください。"
        }
        (Locale::Ja, ConversationNoMicroagents) => {
            "この会話で利用可能なマイクロエージェントはありません。"
        }
        (Locale::Ja, WaitingForRuntime) => "ランタイムの起動を待っています...",
        (Locale::Ja, ButtonRefresh) => "更新",

        (Locale::ZhCn, MicroagentsModalTitle) => "可用的微代理",
        (Locale::ZhCn, MicroagentsModalWarning) => "对微代理的更改仅在开始新对话时生效。",
        (Locale::ZhCn, MicroagentsModalTriggers) => "触发词",
        (Locale::ZhCn, MicroagentsModalContent) => "内容",
        (Locale::ZhCn, MicroagentsModalNoContent) => "该微代理没有内容",
        (Locale::ZhCn, MicroagentsModalFetchError) => "获取微代理失败，请稍后重试。",
        (Locale::ZhCn, ConversationNoMicroagents) => "此对话没有可用的微代理。",
        (Locale::ZhCn, WaitingForRuntime) => "正在等待运行时启动...",
        (Locale::ZhCn, ButtonRefresh) => "刷新",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const LOCALES: [Locale; 6] = [
        Locale::En,
        Locale::De,
        Locale::Es,
        Locale::Fr,
        Locale::Ja,
        Locale::ZhCn,
    ];

    #[test]
    fn test_every_key_resolves_in_every_locale() {
        for locale in LOCALES {
            let catalog = Catalog::new(locale);
            for key in I18nKey::ALL {
                assert!(!catalog.t(key).is_empty(), "{locale:?} {key:?}");
            }
        }
    }

    #[test]
    fn test_messages_are_distinct_within_a_locale() {
        for locale in LOCALES {
            let catalog = Catalog::new(locale);
            let texts: HashSet<&str> = I18nKey::ALL.iter().map(|k| catalog.t(*k)).collect();
            assert_eq!(texts.len(), I18nKey::ALL.len(), "{locale:?}");
        }
    }

    #[test]
    fn test_key_ids_are_unique() {
        let ids: HashSet<&str> = I18nKey::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids.len(), I18nKey::ALL.len());
        assert_eq!(I18nKey::ButtonRefresh.id(), "BUTTON$REFRESH");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("de"), Locale::De);
        assert_eq!(Locale::parse("fr-CA"), Locale::Fr);
        assert_eq!(Locale::parse("zh_CN"), Locale::ZhCn);
        assert_eq!(Locale::parse("ja_JP.UTF-8"), Locale::Ja);
        assert_eq!(Locale::parse("ES"), Locale::Es);
        assert_eq!(Locale::parse("pt-BR"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }

    #[test]
    fn test_default_catalog_is_english() {
        let catalog = Catalog::default();
        assert_eq!(catalog.t(I18nKey::ButtonRefresh), "Refresh");
    }
}
