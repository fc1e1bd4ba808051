//! Built-in seller back-office menu.

use crate::menu::{IconId, MenuNode, MenuTree, TreeError};

/// The menu used when no menu file is configured.
pub fn seller_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::new("inicio", "Início").path("/").icon(IconId::Home),
        MenuNode::new("anuncios", "Anúncios")
            .path("/anuncios")
            .dynamic_id("anuncioId")
            .icon(IconId::Listings),
        MenuNode::new("calculadora", "Calculadora de lucro")
            .path("/calculadora")
            .icon(IconId::Calculator),
        MenuNode::new("atendimento", "Atendimento")
            .icon(IconId::Support)
            .children([
                MenuNode::new("mercado_livre", "Mercado Livre").children([
                    MenuNode::new("perguntas_ml", "Perguntas")
                        .path("/perguntas")
                        .icon(IconId::Questions),
                    MenuNode::new("reclamacoes_ml", "Reclamações")
                        .path("/reclamacoes")
                        .icon(IconId::Complaints),
                ]),
                MenuNode::new("shopee", "Shopee").child(
                    MenuNode::new("perguntas_shopee", "Perguntas")
                        .path("/perguntas")
                        .icon(IconId::Questions),
                ),
            ]),
        MenuNode::new("relatorios", "Relatórios")
            .icon(IconId::Reports)
            .children([
                MenuNode::new("vendas", "Vendas").path("/vendas"),
                MenuNode::new("lucro", "Lucro por anúncio").path("/lucro"),
            ]),
        MenuNode::new("colaboradores", "Colaboradores")
            .path("/colaboradores")
            .dynamic_id("colaboradorId")
            .icon(IconId::Collaborators),
        MenuNode::new("configuracoes", "Configurações")
            .icon(IconId::Settings)
            .children([
                MenuNode::new("impostos", "Impostos")
                    .path("/impostos")
                    .icon(IconId::Taxes),
                MenuNode::new("integracoes", "Integrações")
                    .path("/integracoes")
                    .icon(IconId::Integrations),
            ]),
    ]
}

/// [`seller_menu`] indexed under `base_path`.
pub fn seller_tree(base_path: &str) -> Result<MenuTree, TreeError> {
    MenuTree::new(base_path, seller_menu())
}
