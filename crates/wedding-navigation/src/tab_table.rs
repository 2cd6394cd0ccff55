use crate::NavTabSpec;

const ADMIN_BADGE: Option<&str> = Some("ADMIN");

const ORDRE_JOUR: NavTabSpec = NavTabSpec {
    id: "ordre_jour",
    title: "Ordre du jour",
    icon: "📅",
    description: "Programme de la journée",
    page: "ordre_jour.html",
    badge: None,
};

const MENU: NavTabSpec = NavTabSpec {
    id: "menu",
    title: "Menu",
    icon: "🍽️",
    description: "Découvrez les délices du jour",
    page: "menu.html",
    badge: None,
};

const COMMENTAIRE: NavTabSpec = NavTabSpec {
    id: "commentaire",
    title: "Commentaires",
    icon: "💬",
    description: "Livre d'or et messages",
    page: "commentaire.html",
    badge: None,
};

/// Tiles shown to every guest.
pub const COMMON_TABS: &[NavTabSpec] = &[
    ORDRE_JOUR,
    MENU,
    NavTabSpec {
        id: "ma_table",
        title: "Ma table",
        icon: "🪑",
        description: "Votre plan de table",
        page: "ma_table.html",
        badge: None,
    },
    NavTabSpec {
        id: "media",
        title: "Média",
        icon: "📸",
        description: "Photos et vidéos partagées",
        page: "media.html",
        badge: None,
    },
    NavTabSpec {
        id: "info",
        title: "Infos",
        icon: "ℹ️",
        description: "Informations pratiques",
        page: "info.html",
        badge: None,
    },
    COMMENTAIRE,
];

/// Full tile set for administrators.
pub const ADMIN_TABS: &[NavTabSpec] = &[
    ORDRE_JOUR,
    MENU,
    NavTabSpec {
        id: "vue_generale_salle",
        title: "Vue générale de la salle",
        icon: "🏛️",
        description: "Vue d'ensemble de la salle",
        page: "vue_generale_salle.html",
        badge: ADMIN_BADGE,
    },
    NavTabSpec {
        id: "vue_entree",
        title: "Vue de l'entrée",
        icon: "🚪",
        description: "Surveillance de l'entrée",
        page: "vue_entree.html",
        badge: ADMIN_BADGE,
    },
    NavTabSpec {
        id: "info_admin",
        title: "Info admin",
        icon: "⚙️",
        description: "Gestion des informations",
        page: "info_admin.html",
        badge: ADMIN_BADGE,
    },
    NavTabSpec {
        id: "media_admin",
        title: "Média admin",
        icon: "📹",
        description: "Gestion des médias",
        page: "media_admin.html",
        badge: ADMIN_BADGE,
    },
    COMMENTAIRE,
];
