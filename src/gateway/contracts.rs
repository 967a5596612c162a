alloy::sol! {
    interface IQuestCore {
        struct Quest {
            uint256 id;
            address quest;
            uint256[] heroes;
            address player;
            uint256 startTime;
            uint256 startBlock;
            uint256 completeAtTime;
            uint8 attempts;
            uint8 status;
        }

        function getAccountActiveQuests(address account) external view returns (Quest[] quests);
        function getCurrentStamina(uint256 heroId) external view returns (uint256 stamina);
        function startQuest(uint256[] heroIds, address questAddress, uint8 attempts, uint8 level) external;
        function completeQuest(uint256 heroId) external;

        event QuestXP(uint256 indexed questId, address indexed player, uint256 heroId, uint64 xpEarned);
        event QuestSkillUp(uint256 indexed questId, address indexed player, uint256 heroId, uint8 profession, uint16 skillUp);
        event QuestReward(uint256 indexed questId, address indexed player, uint256 heroId, address rewardItem, uint256 itemQuantity);
    }

    interface IItemConsumer {
        function consumeItem(address item, uint256 heroId) external;
    }

    interface IHeroCore {
        struct SummoningInfo {
            uint256 summonedTime;
            uint256 nextSummonTime;
            uint256 summonerId;
            uint256 assistantId;
            uint32 summons;
            uint32 maxSummons;
        }

        struct HeroInfo {
            uint256 statGenes;
            uint256 visualGenes;
            uint8 rarity;
            bool shiny;
            uint16 generation;
            uint32 firstName;
            uint32 lastName;
            uint8 shinyStyle;
            uint8 class;
            uint8 subClass;
        }

        struct HeroState {
            uint256 staminaFullAt;
            uint256 hpFullAt;
            uint256 mpFullAt;
            uint16 level;
            uint64 xp;
            address currentQuest;
            uint8 sp;
            uint8 status;
        }

        struct HeroStats {
            uint16 strength;
            uint16 intelligence;
            uint16 wisdom;
            uint16 luck;
            uint16 agility;
            uint16 vitality;
            uint16 endurance;
            uint16 dexterity;
            uint16 hp;
            uint16 mp;
            uint16 stamina;
        }

        struct HeroStatGrowth {
            uint16 strength;
            uint16 intelligence;
            uint16 wisdom;
            uint16 luck;
            uint16 agility;
            uint16 vitality;
            uint16 endurance;
            uint16 dexterity;
            uint16 hpSm;
            uint16 hpRg;
            uint16 hpLg;
            uint16 mpSm;
            uint16 mpRg;
            uint16 mpLg;
        }

        struct HeroProfessions {
            uint16 mining;
            uint16 gardening;
            uint16 foraging;
            uint16 fishing;
        }

        struct Hero {
            uint256 id;
            SummoningInfo summoningInfo;
            HeroInfo info;
            HeroState state;
            HeroStats stats;
            HeroStatGrowth primaryStatGrowth;
            HeroStatGrowth secondaryStatGrowth;
            HeroProfessions professions;
        }

        function getHero(uint256 id) external view returns (Hero hero);
    }
}
